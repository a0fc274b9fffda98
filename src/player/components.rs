//! Runner-related components

use bevy::prelude::*;

use crate::replay::ReplaySubject;

/// Who is allowed to move the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    /// Player input and physics drive the runner.
    Live,
    /// Input and physics are suspended; only replay or the run controller
    /// may move it.
    #[default]
    Frozen,
}

/// The controlled entity of a run
#[derive(Component, Debug, Clone, Default)]
pub struct Runner {
    control: ControlState,
    /// Set when the runner hits an obstacle
    pub dead: bool,
}

impl Runner {
    pub fn is_live(&self) -> bool {
        self.control == ControlState::Live
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.control = if frozen {
            ControlState::Frozen
        } else {
            ControlState::Live
        };
    }
}

/// 3D velocity vector
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct Velocity(pub Vec3);

/// Whether the runner is standing on the runway
#[derive(Component, Default)]
pub struct Grounded(pub bool);

/// Seconds until the next jump is allowed
#[derive(Component, Default)]
pub struct JumpCooldown(pub f32);

/// A box the runner must not touch
#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle {
    pub half_extents: Vec3,
}

/// Mutable view of the runner entity used by the recorder and playback.
///
/// Holds `Mut` handles so reading the pose does not trigger change detection.
pub struct RunnerSubject<'a> {
    pub transform: Mut<'a, Transform>,
    pub runner: Mut<'a, Runner>,
    pub velocity: Mut<'a, Velocity>,
}

impl<'a> RunnerSubject<'a> {
    pub fn new(
        transform: Mut<'a, Transform>,
        runner: Mut<'a, Runner>,
        velocity: Mut<'a, Velocity>,
    ) -> Self {
        Self {
            transform,
            runner,
            velocity,
        }
    }

    /// Put the runner at the start of a run: alive, at rest, at `position`.
    pub fn reset_to(&mut self, position: Vec3, rotation: Quat) {
        self.transform.translation = position;
        self.transform.rotation = rotation;
        self.velocity.0 = Vec3::ZERO;
        self.runner.dead = false;
    }
}

impl ReplaySubject for RunnerSubject<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn is_dead(&self) -> bool {
        self.runner.dead
    }

    fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        self.transform.translation = position;
        self.transform.rotation = rotation;
    }

    fn set_frozen(&mut self, frozen: bool) {
        self.runner.set_frozen(frozen);
        if frozen {
            // Kinematic while frozen
            self.velocity.0 = Vec3::ZERO;
        }
    }
}
