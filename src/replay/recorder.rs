//! Captures the runner's pose once per tick while a run is in progress.

use bevy::prelude::*;
use std::time::Duration;

use super::data::{ReplayFrame, ReplayTrack};
use super::store::{ReplayStore, ReplayStoreError};
use super::subject::ReplaySubject;

/// Recording session state.
///
/// `now` is the elapsed time of any monotonic clock. Frames store seconds
/// since `start_recording`, so only that small offset is ever an `f32`.
#[derive(Resource, Default)]
pub struct ReplayRecorder {
    active: bool,
    track: ReplayTrack,
    origin: Duration,
    /// Last completed track, kept even when saving it failed.
    last_track: Option<ReplayTrack>,
}

impl ReplayRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.active
    }

    /// Frames captured so far in the open session.
    pub fn track(&self) -> &ReplayTrack {
        &self.track
    }

    pub fn last_track(&self) -> Option<&ReplayTrack> {
        self.last_track.as_ref()
    }

    /// Begin a new session, discarding any track in progress, and hand
    /// control of the subject back to the player.
    pub fn start_recording(&mut self, now: Duration, subject: &mut impl ReplaySubject) {
        if self.active {
            info!(
                "Restarting recording, discarding {} captured frames",
                self.track.len()
            );
        }
        self.track.clear();
        self.active = true;
        self.origin = now;
        subject.set_frozen(false);
        info!("Recording started");
    }

    /// Append one frame with the subject's current state. No-op when idle.
    pub fn capture_tick(&mut self, now: Duration, subject: &impl ReplaySubject) {
        if !self.active {
            return;
        }
        self.push_sample(now, subject);
    }

    /// Close the session and return the completed track.
    ///
    /// A final frame is captured at `now` so the track ends on the exact
    /// pose at stop. Returns `None` when no session was open.
    pub fn stop_recording(
        &mut self,
        now: Duration,
        subject: &impl ReplaySubject,
    ) -> Option<ReplayTrack> {
        if !self.active {
            return None;
        }
        self.push_sample(now, subject);
        self.active = false;
        self.origin = Duration::ZERO;

        let track = std::mem::take(&mut self.track);
        info!(
            "Recording stopped: {} frames over {:.2}s",
            track.len(),
            track.duration()
        );
        self.last_track = Some(track.clone());
        Some(track)
    }

    /// Close the session and write the track to `store`.
    ///
    /// Returns the number of frames written, `Ok(0)` when nothing was being
    /// recorded. On error the track remains available from `last_track`.
    pub fn stop_recording_and_save(
        &mut self,
        now: Duration,
        subject: &impl ReplaySubject,
        store: &ReplayStore,
    ) -> Result<usize, ReplayStoreError> {
        let Some(track) = self.stop_recording(now, subject) else {
            return Ok(0);
        };
        store.save(&track)?;
        Ok(track.len())
    }

    fn push_sample(&mut self, now: Duration, subject: &impl ReplaySubject) {
        // Clamp so a clock hiccup can never produce a decreasing timestamp.
        let floor = self.track.last().map(|f| f.time).unwrap_or(0.0);
        let time = now.saturating_sub(self.origin).as_secs_f32().max(floor);
        self.track.push(ReplayFrame::new(
            subject.position(),
            subject.rotation(),
            subject.is_dead(),
            time,
        ));
    }
}
