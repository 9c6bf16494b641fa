//! Console observers for training pipelines

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error::{Error, Result},
    ports::{EpisodeRecord, Mode, TrainingObserver},
};

/// Progress bar observer - shows training progress and rolling results
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    episodes: usize,
    successes: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            episodes: 0,
            successes: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        match record.mode {
            Mode::Train => {
                self.episodes += 1;
                if record.success {
                    self.successes += 1;
                }
                if let Some(pb) = &self.progress_bar {
                    pb.set_position(self.episodes as u64);
                    pb.set_message(format!(
                        "SR:{:.0}% steps:{} R:{:.1}",
                        100.0 * self.successes as f64 / self.episodes as f64,
                        record.steps,
                        record.total_reward,
                    ));
                }
            }
            Mode::Eval => {
                let line = format!(
                    "[eval] ep={} steps={} reward={:.1} success={}",
                    record.episode, record.steps, record.total_reward, record.success,
                );
                match &self.progress_bar {
                    Some(pb) => pb.println(line),
                    None => println!("{line}"),
                }
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "SR:{:.0}%",
                if self.episodes > 0 {
                    100.0 * self.successes as f64 / self.episodes as f64
                } else {
                    0.0
                }
            ));
        }
        Ok(())
    }
}
