//! Run controller
//!
//! Owns the menu → run → game over → replay flow. Other modules ask for
//! transitions by writing `RunCommand` messages; the controller is the only
//! place that starts or stops recording and playback.

mod systems;

pub use systems::{
    apply_run_commands, handle_replay_finished, handle_run_keys, update_score,
};

use bevy::prelude::*;

/// Where the game currently is
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    MainMenu,
    /// Live run, recording
    Running,
    /// Death panel shown
    GameOver,
    /// Playing back the last run
    Replaying,
}

/// Requests to the run controller
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCommand {
    StartRun,
    EndRun,
    StartReplay,
    Restart,
    MainMenu,
    Quit,
}

/// Run score, grows with time survived
#[derive(Resource, Debug, Default)]
pub struct Score {
    pub value: f32,
    pub counting: bool,
}

impl Score {
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.counting = true;
    }

    pub fn tick(&mut self, dt: f32, rate: f32) {
        if self.counting {
            self.value += dt * rate;
        }
    }

    /// Whole points shown to the player
    pub fn display(&self) -> u32 {
        self.value.max(0.0).floor() as u32
    }
}

/// One-line feedback shown on the game over panel
#[derive(Resource, Debug, Default)]
pub struct RunStatus(pub Option<String>);

/// Run condition: true while a live run is in progress
pub fn run_active(phase: Res<RunPhase>) -> bool {
    *phase == RunPhase::Running
}

/// Run condition: true while a replay is playing
pub fn replay_active(phase: Res<RunPhase>) -> bool {
    *phase == RunPhase::Replaying
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_counts_only_while_counting() {
        let mut score = Score::default();
        score.tick(1.0, 10.0);
        assert_eq!(score.display(), 0);

        score.reset();
        score.tick(0.25, 10.0);
        score.tick(0.25, 10.0);
        assert_eq!(score.display(), 5);

        score.counting = false;
        score.tick(10.0, 10.0);
        assert_eq!(score.display(), 5);
    }

    #[test]
    fn test_score_display_floors() {
        let score = Score {
            value: 12.99,
            counting: false,
        };
        assert_eq!(score.display(), 12);
    }
}
