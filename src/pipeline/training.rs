//! Training controller: episode loop, evaluation interleave, rolling stats
//!
//! A [`TrainingSession`] sequences environment steps, value updates,
//! periodic greedy evaluation, and statistics, all on one logical thread.
//! Collaborators attach through ports: observers receive every step and
//! episode record, an optional control source is polled once per step for
//! one-shot commands, and an optional renderer draws each frame.

use std::{
    collections::VecDeque,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{
    agent::HybridAgent,
    env::MazeEnv,
    error::{Error, Result},
    ports::{
        ControlSource, EpisodeRecord, Hud, Mode, NullControl, Renderer, StepRecord,
        TrainingObserver,
    },
};

/// Offset added to evaluation episode ids so the two record streams cannot
/// collide with training ids
pub const EVAL_EPISODE_OFFSET: usize = 100_000;

const ROLLING_WINDOW: usize = 50;
const MIN_FPS: u32 = 10;
const MAX_FPS: u32 = 240;

/// Training configuration, constructed once and read-only afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,
    /// Run a greedy evaluation episode every N training episodes; 0 disables
    pub eval_every: usize,
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Exploration rate
    pub epsilon: f64,
    /// Within exploration, probability of A*-guided movement
    pub heuristic_rate: f64,
    pub max_steps_per_episode: usize,
    /// Render each frame to a display surface
    pub visual: bool,
    /// Poll an interactive control surface
    pub interactive: bool,
    /// Target frame rate for the display surface
    pub fps: u32,
    /// Base path for the step/episode CSV streams
    pub log_path: PathBuf,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 300,
            eval_every: 50,
            alpha: 0.1,
            gamma: 0.99,
            epsilon: 0.25,
            heuristic_rate: 0.30,
            max_steps_per_episode: 600,
            visual: false,
            interactive: true,
            fps: 60,
            log_path: PathBuf::from("training_logs.csv"),
        }
    }
}

impl TrainingConfig {
    /// Reject values the trainer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episodes must be at least 1".to_string(),
            });
        }
        if self.max_steps_per_episode == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max steps per episode must be at least 1".to_string(),
            });
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("alpha must be in (0, 1], got {}", self.alpha),
            });
        }
        for (name, value) in [
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
            ("heuristic_rate", self.heuristic_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be in [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Result of a single episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub episode: usize,
    pub steps: usize,
    pub total_reward: f64,
    pub success: bool,
}

/// Fixed-window statistics over the most recent training episodes
#[derive(Debug, Clone)]
pub struct RollingStats {
    success: VecDeque<bool>,
    rewards: VecDeque<f64>,
    steps: VecDeque<usize>,
    window: usize,
}

impl RollingStats {
    pub fn new(window: usize) -> Self {
        Self {
            success: VecDeque::with_capacity(window),
            rewards: VecDeque::with_capacity(window),
            steps: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Append one episode, evicting the oldest beyond the window
    pub fn push(&mut self, outcome: &EpisodeOutcome) {
        if self.success.len() == self.window {
            self.success.pop_front();
            self.rewards.pop_front();
            self.steps.pop_front();
        }
        self.success.push_back(outcome.success);
        self.rewards.push_back(outcome.total_reward);
        self.steps.push_back(outcome.steps);
    }

    /// Fraction of recent episodes that reached the goal, in [0, 1]
    pub fn success_rate(&self) -> f64 {
        if self.success.is_empty() {
            return 0.0;
        }
        self.success.iter().filter(|&&s| s).count() as f64 / self.success.len() as f64
    }

    /// Mean total reward over the window; 0.0 when empty
    pub fn mean_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            return 0.0;
        }
        self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
    }

    /// Mean step count over the window; 0.0 when empty
    pub fn mean_steps(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.steps.iter().sum::<usize>() as f64 / self.steps.len() as f64
    }

    pub fn len(&self) -> usize {
        self.success.len()
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_empty()
    }
}

/// Aggregate result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    pub episodes: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub avg_reward: f64,
    pub avg_steps: f64,
}

impl TrainingResult {
    pub fn new(episodes: usize, successes: usize, total_reward: f64, total_steps: usize) -> Self {
        let denom = episodes.max(1) as f64;
        Self {
            episodes,
            successes,
            success_rate: successes as f64 / denom,
            avg_reward: total_reward / denom,
            avg_steps: total_steps as f64 / denom,
        }
    }

    /// Save result to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from a JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives training and evaluation episodes over one environment and agent
pub struct TrainingSession<'g> {
    config: TrainingConfig,
    env: MazeEnv<'g>,
    agent: HybridAgent,
    observers: Vec<Box<dyn TrainingObserver>>,
    control: Box<dyn ControlSource>,
    renderer: Option<Box<dyn Renderer>>,
    stats: RollingStats,
    episode_id: usize,
    episodes_target: usize,
    fps: u32,
    paused: bool,
    stop_requested: bool,
    restart_flag: bool,
    step_once: bool,
    next_episode_gate: bool,
    started: Instant,
}

impl<'g> TrainingSession<'g> {
    pub fn new(config: TrainingConfig, env: MazeEnv<'g>, agent: HybridAgent) -> Self {
        let episodes_target = config.episodes.max(1);
        let fps = config.fps.clamp(MIN_FPS, MAX_FPS);
        Self {
            config,
            env,
            agent,
            observers: Vec::new(),
            control: Box::new(NullControl),
            renderer: None,
            stats: RollingStats::new(ROLLING_WINDOW),
            episode_id: 0,
            episodes_target,
            fps,
            paused: false,
            stop_requested: false,
            restart_flag: false,
            step_once: false,
            next_episode_gate: false,
            started: Instant::now(),
        }
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Attach an interactive control source
    pub fn with_control(mut self, control: Box<dyn ControlSource>) -> Self {
        self.control = control;
        self
    }

    /// Attach a display surface
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn agent(&self) -> &HybridAgent {
        &self.agent
    }

    pub fn stats(&self) -> &RollingStats {
        &self.stats
    }

    /// Run training episodes up to the (runtime-adjustable) target,
    /// interleaving greedy evaluation every `eval_every` episodes.
    pub fn run(&mut self) -> Result<TrainingResult> {
        self.started = Instant::now();
        for observer in &mut self.observers {
            observer.on_training_start(self.episodes_target)?;
        }

        let mut completed = 0usize;
        let mut successes = 0usize;
        let mut total_reward = 0.0f64;
        let mut total_steps = 0usize;

        let mut ep = 0usize;
        while ep < self.episodes_target && !self.stop_requested {
            self.episode_id = ep + 1;

            let outcome = self.run_episode()?;
            self.stats.push(&outcome);
            completed += 1;
            if outcome.success {
                successes += 1;
            }
            total_reward += outcome.total_reward;
            total_steps += outcome.steps;

            if self.config.eval_every > 0
                && self.episode_id.is_multiple_of(self.config.eval_every)
                && !self.stop_requested
            {
                self.run_evaluation()?;
            }

            ep += 1;

            // paused at an episode boundary: idle until resumed or gated
            // through to the next episode
            while self.paused && !self.stop_requested {
                self.handle_controls();
                self.render(Mode::Train, self.episode_id, 0, 0.0)?;
                self.idle_tick();
                if self.next_episode_gate {
                    self.next_episode_gate = false;
                    break;
                }
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            completed,
            successes,
            total_reward,
            total_steps,
        ))
    }

    /// One training episode: exploration on, Q-table updated every step
    fn run_episode(&mut self) -> Result<EpisodeOutcome> {
        let mode = Mode::Train;
        let mut state = self.env.reset();
        let mut total_reward = 0.0f64;
        let mut steps = 0usize;

        self.render(mode, self.episode_id, steps, total_reward)?;

        loop {
            self.handle_controls();

            if self.stop_requested {
                // prompt unwind: record a non-success, skip episode logging
                return Ok(EpisodeOutcome {
                    episode: self.episode_id,
                    steps,
                    total_reward,
                    success: false,
                });
            }

            if self.restart_flag {
                self.restart_flag = false;
                state = self.env.reset();
                total_reward = 0.0;
                steps = 0;
            }

            if self.paused && !self.step_once {
                self.render(mode, self.episode_id, steps, total_reward)?;
                self.idle_tick();
                continue;
            }

            self.render(mode, self.episode_id, steps, total_reward)?;

            let (action, source) = self.agent.decide(state, &self.env);
            let transition = self.env.step(action);
            self.agent.update(state, action, transition.reward, transition.state);

            total_reward += transition.reward;
            steps += 1;

            let record = StepRecord {
                episode: self.episode_id,
                t: steps,
                row: transition.state.row,
                col: transition.state.col,
                action,
                reward: transition.reward,
                done: transition.done,
                mode,
                source,
            };
            for observer in &mut self.observers {
                observer.on_step(&record)?;
            }

            state = transition.state;

            if self.step_once {
                self.step_once = false;
            }

            if transition.done {
                let success = self.env.agent_pos() == self.env.goal();
                let record = EpisodeRecord {
                    episode: self.episode_id,
                    steps,
                    total_reward,
                    success,
                    mode,
                    elapsed_s: self.started.elapsed().as_secs_f64(),
                };
                for observer in &mut self.observers {
                    observer.on_episode_end(&record)?;
                }
                return Ok(EpisodeOutcome {
                    episode: self.episode_id,
                    steps,
                    total_reward,
                    success,
                });
            }
        }
    }

    /// One evaluation episode: pure greedy play, Q-table untouched.
    ///
    /// Exploration and heuristic rates are zeroed for the duration and
    /// restored on every exit path, including a cooperative stop.
    fn run_evaluation(&mut self) -> Result<EpisodeOutcome> {
        let old_epsilon = self.agent.epsilon();
        let old_heuristic_rate = self.agent.heuristic_rate();
        self.agent.set_epsilon(0.0);
        self.agent.set_heuristic_rate(0.0);

        let outcome = self.eval_episode(EVAL_EPISODE_OFFSET + self.episode_id);

        self.agent.set_epsilon(old_epsilon);
        self.agent.set_heuristic_rate(old_heuristic_rate);
        outcome
    }

    fn eval_episode(&mut self, eval_id: usize) -> Result<EpisodeOutcome> {
        let mode = Mode::Eval;
        let mut state = self.env.reset();
        let mut total_reward = 0.0f64;
        let mut steps = 0usize;

        self.render(mode, eval_id, steps, total_reward)?;

        loop {
            self.handle_controls();
            if self.stop_requested {
                break;
            }

            self.render(mode, eval_id, steps, total_reward)?;

            let (action, source) = self.agent.decide(state, &self.env);
            let transition = self.env.step(action);

            total_reward += transition.reward;
            steps += 1;

            let record = StepRecord {
                episode: eval_id,
                t: steps,
                row: transition.state.row,
                col: transition.state.col,
                action,
                reward: transition.reward,
                done: transition.done,
                mode,
                source,
            };
            for observer in &mut self.observers {
                observer.on_step(&record)?;
            }

            state = transition.state;

            if transition.done {
                break;
            }
        }

        let success = self.env.agent_pos() == self.env.goal();
        let record = EpisodeRecord {
            episode: eval_id,
            steps,
            total_reward,
            success,
            mode,
            elapsed_s: self.started.elapsed().as_secs_f64(),
        };
        for observer in &mut self.observers {
            observer.on_episode_end(&record)?;
        }

        Ok(EpisodeOutcome {
            episode: eval_id,
            steps,
            total_reward,
            success,
        })
    }

    /// Poll the control source and apply its commands.
    ///
    /// `stop` latches once seen; `paused` mirrors the source's current
    /// state; everything else is consumed as a one-shot.
    fn handle_controls(&mut self) {
        let command = self.control.poll();

        self.paused = command.paused;
        if command.stop {
            self.stop_requested = true;
        }

        if command.fps_delta != 0 {
            let fps =
                (i64::from(self.fps) + i64::from(command.fps_delta)).clamp(MIN_FPS.into(), MAX_FPS.into());
            self.fps = fps as u32;
            if let Some(renderer) = &mut self.renderer {
                renderer.set_fps(self.fps);
            }
        }

        if command.episodes_delta != 0 {
            self.episodes_target =
                (self.episodes_target as i64 + command.episodes_delta).max(1) as usize;
        }

        if command.restart_episode {
            self.restart_flag = true;
        }
        if command.step_once {
            self.step_once = true;
        }
        if command.next_episode {
            self.next_episode_gate = true;
        }
    }

    fn render(&mut self, mode: Mode, episode: usize, t: usize, total_reward: f64) -> Result<()> {
        let Some(renderer) = &mut self.renderer else {
            return Ok(());
        };
        let hud = Hud {
            mode,
            episode,
            episodes_target: self.episodes_target,
            t,
            total_reward,
            success_rate: self.stats.success_rate(),
            alpha: self.agent.alpha(),
            gamma: self.agent.gamma(),
            epsilon: self.agent.epsilon(),
            heuristic_rate: self.agent.heuristic_rate(),
            paused: self.paused,
            fps: self.fps,
        };
        renderer.draw(&self.env, &hud)
    }

    /// The renderer's frame pacing throttles pause loops; without one, a
    /// short sleep keeps a paused session from spinning hot.
    fn idle_tick(&self) {
        if self.renderer.is_none() {
            thread::sleep(Duration::from_millis(1));
        }
    }
}
