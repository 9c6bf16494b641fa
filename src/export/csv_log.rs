//! CSV logging of step and episode records
//!
//! Two append-only streams are derived from one base path: `<stem>_steps.csv`
//! and `<stem>_episodes.csv`. Each stream gets its fixed column header
//! exactly once, when the file is first created; later runs append below the
//! existing header. Both streams are flushed at the end of training.

use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use csv::Writer;

use crate::{
    error::{Error, Result},
    ports::{EpisodeRecord, StepRecord, TrainingObserver},
};

const STEP_HEADER: [&str; 9] = [
    "episode", "t", "row", "col", "action", "reward", "done", "mode", "source",
];
const EPISODE_HEADER: [&str; 6] = [
    "episode",
    "steps",
    "total_reward",
    "success",
    "mode",
    "elapsed_s",
];

/// Observer that appends every step and episode to CSV files
pub struct CsvLogger {
    steps: Writer<File>,
    episodes: Writer<File>,
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    base.with_file_name(name)
}

fn open_stream(path: &Path, header: &[&str]) -> Result<Writer<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io {
            operation: format!("create log directory {}", parent.display()),
            source,
        })?;
    }

    let is_new = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Io {
            operation: format!("open log file {}", path.display()),
            source,
        })?;

    let mut writer = Writer::from_writer(file);
    if is_new {
        writer.write_record(header)?;
    }
    Ok(writer)
}

impl CsvLogger {
    /// Open (or append to) the two log streams derived from `base`
    pub fn new<P: AsRef<Path>>(base: P) -> Result<Self> {
        let base = base.as_ref();
        Ok(Self {
            steps: open_stream(&with_suffix(base, "_steps.csv"), &STEP_HEADER)?,
            episodes: open_stream(&with_suffix(base, "_episodes.csv"), &EPISODE_HEADER)?,
        })
    }
}

impl TrainingObserver for CsvLogger {
    fn on_step(&mut self, record: &StepRecord) -> Result<()> {
        self.steps.write_record([
            record.episode.to_string(),
            record.t.to_string(),
            record.row.to_string(),
            record.col.to_string(),
            record.action.index().to_string(),
            record.reward.to_string(),
            u8::from(record.done).to_string(),
            record.mode.as_str().to_string(),
            record.source.as_str().to_string(),
        ])?;
        Ok(())
    }

    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        self.episodes.write_record([
            record.episode.to_string(),
            record.steps.to_string(),
            record.total_reward.to_string(),
            u8::from(record.success).to_string(),
            record.mode.as_str().to_string(),
            format!("{:.3}", record.elapsed_s),
        ])?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.steps.flush()?;
        self.episodes.flush()?;
        Ok(())
    }
}
