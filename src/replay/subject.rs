//! Seams between the replay engine and the rest of the game.

use bevy::prelude::*;

/// The entity being recorded or driven by playback.
pub trait ReplaySubject {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn is_dead(&self) -> bool;

    /// Overwrite the transform with a recorded pose.
    fn set_pose(&mut self, position: Vec3, rotation: Quat);

    /// Suspend (`true`) or restore (`false`) live control of the entity.
    fn set_frozen(&mut self, frozen: bool);
}

/// How a replay finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// The cursor reached the last frame.
    Ended,
    /// A frame captured while dead was reached.
    Died,
}

/// Receives the terminal notifications of a replay.
///
/// Each playback fires at most one of these, exactly once.
pub trait ReplaySignals {
    fn replay_ended(&mut self);
    fn replay_died(&mut self);
}

/// Collects outcomes in order; handy for headless callers and tests.
impl ReplaySignals for Vec<ReplayOutcome> {
    fn replay_ended(&mut self) {
        self.push(ReplayOutcome::Ended);
    }

    fn replay_died(&mut self) {
        self.push(ReplayOutcome::Died);
    }
}
