//! Terminal adapters for the renderer and control ports
//!
//! [`TermRenderer`] draws the maze and HUD to stdout with ANSI positioning
//! and paces itself to the configured frame rate. [`StdinControl`] turns
//! line commands on stdin into [`ControlCommand`]s without ever blocking
//! the training loop: a pump thread feeds a channel that the loop drains
//! with a non-blocking receive.

use std::{
    io::{self, BufRead, Write},
    sync::mpsc::{Receiver, TryRecvError, channel},
    thread,
    time::{Duration, Instant},
};

use crate::{
    env::MazeEnv,
    error::{Error, Result},
    grid::Coord,
    ports::{ControlCommand, ControlSource, Hud, Renderer},
};

const MIN_FPS: u32 = 10;
const MAX_FPS: u32 = 240;

/// Plain-terminal display surface
pub struct TermRenderer {
    fps: u32,
    last_frame: Option<Instant>,
}

impl TermRenderer {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.clamp(MIN_FPS, MAX_FPS),
            last_frame: None,
        }
    }

    fn glyph(env: &MazeEnv<'_>, at: Coord) -> char {
        if at == env.agent_pos() {
            'A'
        } else if at == env.goal() {
            'G'
        } else if env.grid().is_free(at) {
            '.'
        } else {
            '#'
        }
    }
}

impl Renderer for TermRenderer {
    fn draw(&mut self, env: &MazeEnv<'_>, hud: &Hud) -> Result<()> {
        // frame pacing: sleep off whatever remains of this frame's budget
        if let Some(last) = self.last_frame {
            let budget = Duration::from_secs_f64(1.0 / f64::from(self.fps));
            if let Some(rest) = budget.checked_sub(last.elapsed()) {
                thread::sleep(rest);
            }
        }
        self.last_frame = Some(Instant::now());

        let grid = env.grid();
        let mut frame = String::with_capacity((grid.cols() + 1) * grid.rows() + 256);
        frame.push_str("\x1b[2J\x1b[H");
        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                frame.push(Self::glyph(env, Coord::new(r, c)));
            }
            frame.push('\n');
        }
        frame.push_str(&format!(
            "mode={}  ep={}/{}  t={}  totalR={:.1}  success={:.0}%\n",
            hud.mode,
            hud.episode,
            hud.episodes_target,
            hud.t,
            hud.total_reward,
            hud.success_rate * 100.0,
        ));
        frame.push_str(&format!(
            "alpha={}  gamma={}  eps={:.3}  heurRate={:.3}  fps={}  paused={}\n",
            hud.alpha, hud.gamma, hud.epsilon, hud.heuristic_rate, hud.fps, hud.paused,
        ));
        frame.push_str(
            "keys: p pause | s step | n next ep | r restart ep | +/- fps | [/] eps target | q stop\n",
        );

        let mut stdout = io::stdout().lock();
        stdout
            .write_all(frame.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|source| Error::Io {
                operation: "write frame to stdout".to_string(),
                source,
            })
    }

    fn set_fps(&mut self, fps: u32) {
        self.fps = fps.clamp(MIN_FPS, MAX_FPS);
    }
}

/// Line-command control adapter over stdin
///
/// Commands: `p` toggle pause, `s` single step, `n` next episode,
/// `r` restart episode, `+`/`-` frame rate, `]`/`[` episode target,
/// `q` stop. The pump thread blocks on stdin; the training loop only ever
/// does a non-blocking channel receive, so the core stays cooperative.
pub struct StdinControl {
    lines: Receiver<String>,
    paused: bool,
    stop: bool,
}

impl StdinControl {
    pub fn spawn() -> Self {
        let (tx, rx) = channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            lines: rx,
            paused: false,
            stop: false,
        }
    }

    fn apply(&mut self, line: &str, command: &mut ControlCommand) {
        match line.trim() {
            "p" => self.paused = !self.paused,
            "s" => command.step_once = true,
            "n" => command.next_episode = true,
            "r" => command.restart_episode = true,
            "+" | "=" => command.fps_delta += 10,
            "-" | "_" => command.fps_delta -= 10,
            "]" => command.episodes_delta += 10,
            "[" => command.episodes_delta -= 10,
            "q" => self.stop = true,
            _ => {}
        }
    }
}

impl ControlSource for StdinControl {
    fn poll(&mut self) -> ControlCommand {
        let mut command = ControlCommand::default();
        loop {
            match self.lines.try_recv() {
                Ok(line) => self.apply(&line, &mut command),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.stop = true;
                    break;
                }
            }
        }
        command.paused = self.paused;
        command.stop = self.stop;
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_for(lines: &[&str]) -> StdinControl {
        let (tx, rx) = channel();
        for line in lines {
            tx.send((*line).to_string()).unwrap();
        }
        drop(tx);
        StdinControl {
            lines: rx,
            paused: false,
            stop: false,
        }
    }

    #[test]
    fn pause_toggles_and_persists() {
        let mut control = control_for(&["p"]);
        // the drained channel also disconnects, which reads as a stop request
        assert!(control.poll().paused);
        let next = control.poll();
        assert!(next.paused);
        assert!(next.stop);
    }

    #[test]
    fn one_shot_commands_fire_on_a_single_poll() {
        let mut control = control_for(&["s", "r", "]", "-"]);
        let command = control.poll();
        assert!(command.step_once);
        assert!(command.restart_episode);
        assert_eq!(command.episodes_delta, 10);
        assert_eq!(command.fps_delta, -10);
    }

    #[test]
    fn quit_latches_stop() {
        let mut control = control_for(&["q"]);
        assert!(control.poll().stop);
        assert!(control.poll().stop);
    }
}
