//! Replay system for recording and playing back runs.
//!
//! The recorder samples the runner every frame during a run, the store
//! persists the finished track as JSON, and playback later drives the frozen
//! runner through the recorded poses, snapping to the latest sample whose
//! time has been reached.

mod data;
mod playback;
mod recorder;
mod store;
mod subject;
mod systems;

pub use data::{ReplayFrame, ReplayTrack};
pub use playback::{PlaybackPhase, ReplayPlayback};
pub use recorder::ReplayRecorder;
pub use store::{ReplayStore, ReplayStoreError, decode_track, encode_track};
pub use subject::{ReplayOutcome, ReplaySignals, ReplaySubject};
pub use systems::{record_tick, replay_tick};

use bevy::prelude::*;

/// Written once when a replay stops on its own
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayFinished(pub ReplayOutcome);
