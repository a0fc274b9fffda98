//! Runner - a 3D endless runner with run recording and replay, built with Bevy
//!
//! This crate provides all game components, resources, and systems organized into modules.

// Core modules
pub mod app;
pub mod constants;
pub mod debug_logging;
pub mod replay;
pub mod run;
pub mod settings;

// Game logic modules
pub mod input;
pub mod player;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use app::RunnerPlugin;
pub use constants::*;
pub use debug_logging::DebugLogConfig;
pub use input::PlayerInput;
pub use player::{ControlState, Grounded, JumpCooldown, Obstacle, Runner, RunnerSubject, Velocity};
pub use replay::{
    PlaybackPhase, ReplayFinished, ReplayFrame, ReplayOutcome, ReplayPlayback, ReplayRecorder,
    ReplaySignals, ReplayStore, ReplayStoreError, ReplaySubject, ReplayTrack,
};
pub use run::{RunCommand, RunPhase, RunStatus, Score, replay_active, run_active};
pub use settings::RunnerSettings;
pub use ui::{FollowCamera, HudText};
pub use world::{Runway, obstacle_layout, spawn_world};
