//! Control port - polled, non-blocking interactive commands
//!
//! The controller polls its control source once per environment step and
//! once per pause tick. A poll never blocks. `paused` and `stop` report the
//! source's current persistent state; the remaining fields are one-shot
//! commands, consumed by the controller on the poll that returns them.

use std::collections::VecDeque;

/// Command bag returned by a single poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlCommand {
    pub paused: bool,
    pub stop: bool,
    pub restart_episode: bool,
    pub step_once: bool,
    pub next_episode: bool,
    pub fps_delta: i32,
    pub episodes_delta: i64,
}

/// Source of interactive control commands
pub trait ControlSource {
    fn poll(&mut self) -> ControlCommand;
}

/// Headless control source: never pauses, never stops
#[derive(Debug, Clone, Copy, Default)]
pub struct NullControl;

impl ControlSource for NullControl {
    fn poll(&mut self) -> ControlCommand {
        ControlCommand::default()
    }
}

/// Replays a fixed command sequence, then yields the default command.
///
/// Each scripted command supplies the full pause/stop state for that poll,
/// so a script that wants to stay paused across several polls must repeat
/// `paused: true`. Used by tests and demos.
#[derive(Debug, Clone, Default)]
pub struct ScriptedControl {
    commands: VecDeque<ControlCommand>,
}

impl ScriptedControl {
    pub fn new(commands: impl IntoIterator<Item = ControlCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn push(&mut self, command: ControlCommand) {
        self.commands.push_back(command);
    }
}

impl ControlSource for ScriptedControl {
    fn poll(&mut self) -> ControlCommand {
        self.commands.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_control_always_returns_the_default() {
        let mut control = NullControl;
        assert_eq!(control.poll(), ControlCommand::default());
        assert_eq!(control.poll(), ControlCommand::default());
    }

    #[test]
    fn scripted_control_drains_then_defaults() {
        let stop = ControlCommand {
            stop: true,
            ..ControlCommand::default()
        };
        let mut control = ScriptedControl::new([stop]);
        assert_eq!(control.poll(), stop);
        assert_eq!(control.poll(), ControlCommand::default());
    }
}
