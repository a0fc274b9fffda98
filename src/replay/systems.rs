//! Replay systems: per-frame capture and playback

use bevy::prelude::*;

use super::playback::ReplayPlayback;
use super::recorder::ReplayRecorder;
use super::subject::{ReplayOutcome, ReplaySignals};
use super::ReplayFinished;
use crate::player::{Runner, RunnerSubject, Velocity};

impl ReplaySignals for MessageWriter<'_, ReplayFinished> {
    fn replay_ended(&mut self) {
        self.write(ReplayFinished(ReplayOutcome::Ended));
    }

    fn replay_died(&mut self) {
        self.write(ReplayFinished(ReplayOutcome::Died));
    }
}

/// Capture one frame of the runner while recording
pub fn record_tick(
    time: Res<Time>,
    mut recorder: ResMut<ReplayRecorder>,
    mut runners: Query<(&mut Transform, &mut Runner, &mut Velocity)>,
) {
    if !recorder.is_recording() {
        return;
    }
    let Ok((transform, runner, velocity)) = runners.single_mut() else {
        return;
    };
    let subject = RunnerSubject::new(transform, runner, velocity);
    recorder.capture_tick(time.elapsed(), &subject);
}

/// Advance playback and pose the runner from the track
pub fn replay_tick(
    time: Res<Time>,
    mut playback: ResMut<ReplayPlayback>,
    mut runners: Query<(&mut Transform, &mut Runner, &mut Velocity)>,
    mut finished: MessageWriter<ReplayFinished>,
) {
    if !playback.is_active() {
        return;
    }
    let Ok((transform, runner, velocity)) = runners.single_mut() else {
        return;
    };
    let mut subject = RunnerSubject::new(transform, runner, velocity);
    playback.advance_tick(time.delta_secs(), &mut subject, &mut finished);
}
