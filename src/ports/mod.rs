//! Ports — boundaries between the training core and its collaborators
//!
//! The training loop only ever talks to a logger, a visualizer, or an
//! interactive control surface through the traits defined here. Adapters
//! live elsewhere (`export` for CSV, `render` for the terminal surface,
//! `pipeline::observers` for progress display), and every collaborator is
//! optional: the core runs headless with the null implementations.

mod control;
mod observer;
mod render;

pub use control::{ControlCommand, ControlSource, NullControl, ScriptedControl};
pub use observer::{EpisodeRecord, Mode, StepRecord, TrainingObserver};
pub use render::{Hud, Renderer};
