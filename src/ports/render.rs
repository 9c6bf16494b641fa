//! Renderer port - per-frame display of the maze and a HUD data bag

use crate::{env::MazeEnv, error::Result, ports::Mode};

/// Everything a display surface needs to draw one frame
#[derive(Debug, Clone)]
pub struct Hud {
    pub mode: Mode,
    pub episode: usize,
    pub episodes_target: usize,
    /// Steps taken so far in the current episode
    pub t: usize,
    pub total_reward: f64,
    /// Rolling success rate over the recent-episode window, in [0, 1]
    pub success_rate: f64,
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
    pub heuristic_rate: f64,
    pub paused: bool,
    pub fps: u32,
}

/// Display surface for the maze and training HUD
///
/// The core tolerates this collaborator being entirely absent; a session
/// without a renderer runs headless.
pub trait Renderer {
    fn draw(&mut self, env: &MazeEnv<'_>, hud: &Hud) -> Result<()>;

    /// Frame-rate changes requested through the control surface
    fn set_fps(&mut self, _fps: u32) {}
}
