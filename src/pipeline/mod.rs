//! Training orchestration

mod observers;
mod training;

pub use observers::ProgressObserver;
pub use training::{
    EVAL_EPISODE_OFFSET, EpisodeOutcome, RollingStats, TrainingConfig, TrainingResult,
    TrainingSession,
};
