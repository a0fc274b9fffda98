//! Replay playback driver
//!
//! Advances a cursor through a loaded track as time passes and writes the
//! current frame's pose onto the subject. Playback is a step function of
//! time: the subject always sits exactly on the last frame whose timestamp
//! has been reached, never between two frames.

use bevy::prelude::*;

use super::data::ReplayTrack;
use super::store::{ReplayStore, ReplayStoreError};
use super::subject::{ReplaySignals, ReplaySubject};

/// Lifecycle of the playback driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Nothing loaded, or a replay was aborted.
    #[default]
    Idle,
    /// Driving the subject from the track.
    Active,
    /// The cursor reached the final frame.
    Ended,
    /// A frame captured while dead was reached.
    DiedDuringReplay,
}

/// Replay playback state
#[derive(Resource, Default)]
pub struct ReplayPlayback {
    track: ReplayTrack,
    cursor: usize,
    elapsed: f32,
    phase: PlaybackPhase,
}

impl ReplayPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == PlaybackPhase::Active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Seconds of replay time consumed so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn track(&self) -> &ReplayTrack {
        &self.track
    }

    /// Load the stored track and start driving `subject` with it.
    ///
    /// Returns `Ok(false)` without touching the subject when there is no
    /// recorded run to play.
    pub fn start_replay(
        &mut self,
        store: &ReplayStore,
        subject: &mut impl ReplaySubject,
    ) -> Result<bool, ReplayStoreError> {
        let track = store.load()?;
        Ok(self.start_with_track(track, subject))
    }

    /// Start driving `subject` with an already loaded track.
    ///
    /// An empty track leaves the driver where it was and returns `false`.
    pub fn start_with_track(
        &mut self,
        track: ReplayTrack,
        subject: &mut impl ReplaySubject,
    ) -> bool {
        if track.is_empty() {
            info!("Replay skipped: no recorded frames");
            return false;
        }

        info!(
            "Replay started: {} frames, {:.2}s",
            track.len(),
            track.duration()
        );
        self.track = track;
        self.cursor = 0;
        self.elapsed = 0.0;
        self.phase = PlaybackPhase::Active;
        subject.set_frozen(true);
        true
    }

    /// Advance replay time by `dt` seconds and pose the subject.
    ///
    /// Does nothing unless the driver is `Active`. Fires exactly one of the
    /// terminal signals on the tick the replay finishes.
    pub fn advance_tick(
        &mut self,
        dt: f32,
        subject: &mut impl ReplaySubject,
        signals: &mut impl ReplaySignals,
    ) {
        if self.phase != PlaybackPhase::Active {
            return;
        }

        let Some(last) = self.track.last_index() else {
            self.phase = PlaybackPhase::Idle;
            return;
        };

        if self.cursor >= last {
            self.phase = PlaybackPhase::Ended;
            info!("Replay ended after {:.2}s", self.elapsed);
            signals.replay_ended();
            return;
        }

        self.elapsed += dt;

        // Forward scan only: a long stall skips frames but never rewinds.
        let frames = self.track.frames();
        while self.cursor < last && self.elapsed >= frames[self.cursor + 1].time {
            self.cursor += 1;
        }

        let frame = frames[self.cursor];
        subject.set_pose(frame.position, frame.rotation);

        if frame.is_dead {
            self.phase = PlaybackPhase::DiedDuringReplay;
            info!(
                "Replay reached death at frame {} ({:.2}s)",
                self.cursor, frame.time
            );
            signals.replay_died();
        }
    }

    /// Cancel an active replay without firing any signal.
    pub fn abort(&mut self) {
        if self.phase == PlaybackPhase::Active {
            info!("Replay aborted at frame {}", self.cursor);
            self.phase = PlaybackPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::data::ReplayFrame;
    use crate::replay::recorder::tests::TestSubject;
    use crate::replay::subject::ReplayOutcome;

    fn frame(x: f32, time: f32, is_dead: bool) -> ReplayFrame {
        ReplayFrame::new(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY, is_dead, time)
    }

    fn track_at(times: &[f32]) -> ReplayTrack {
        ReplayTrack::from_frames(
            times
                .iter()
                .enumerate()
                .map(|(i, t)| frame(i as f32 * 10.0, *t, false))
                .collect(),
        )
    }

    #[test]
    fn test_empty_track_stays_idle() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();

        assert!(!playback.start_with_track(ReplayTrack::new(), &mut subject));
        assert_eq!(playback.phase(), PlaybackPhase::Idle);
        assert!(subject.freeze_calls.is_empty());
    }

    #[test]
    fn test_missing_store_stays_idle() {
        let dir = std::env::temp_dir().join("runner_playback_test_missing_store");
        let _ = std::fs::remove_dir_all(&dir);
        let store = ReplayStore::new(&dir, "replay.json");
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();

        assert!(!playback.start_replay(&store, &mut subject).unwrap());
        assert_eq!(playback.phase(), PlaybackPhase::Idle);
        assert!(!subject.frozen);
    }

    #[test]
    fn test_corrupt_store_is_error_and_stays_idle() {
        let dir = std::env::temp_dir().join("runner_playback_test_corrupt_store");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let store = ReplayStore::new(&dir, "replay.json");
        std::fs::write(store.path(), b"not json").unwrap();

        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();

        assert!(playback.start_replay(&store, &mut subject).is_err());
        assert_eq!(playback.phase(), PlaybackPhase::Idle);
        assert!(subject.freeze_calls.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_start_freezes_and_resets() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();

        assert!(playback.start_with_track(track_at(&[0.0, 1.0]), &mut subject));
        assert_eq!(playback.phase(), PlaybackPhase::Active);
        assert_eq!(playback.cursor(), 0);
        assert_eq!(playback.elapsed(), 0.0);
        assert!(subject.frozen);
    }

    #[test]
    fn test_step_function_playback() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        playback.start_with_track(track_at(&[0.0, 1.0, 3.0]), &mut subject);

        // (elapsed after tick, expected cursor)
        let expected = [
            (0.5, 0),
            (1.0, 1),
            (1.5, 1),
            (2.0, 1),
            (2.5, 1),
            (3.0, 2),
        ];
        for (elapsed, cursor) in expected {
            playback.advance_tick(0.5, &mut subject, &mut signals);
            assert_eq!(playback.elapsed(), elapsed);
            assert_eq!(playback.cursor(), cursor, "cursor at elapsed {elapsed}");
            // Pose is exactly the recorded sample, never a blend.
            assert_eq!(subject.position.x, cursor as f32 * 10.0);
            assert_eq!(playback.phase(), PlaybackPhase::Active);
        }
        assert!(signals.is_empty());

        // Next tick notices the cursor is on the last frame.
        let writes = subject.pose_writes;
        playback.advance_tick(0.5, &mut subject, &mut signals);
        assert_eq!(playback.phase(), PlaybackPhase::Ended);
        assert_eq!(signals, vec![ReplayOutcome::Ended]);
        assert_eq!(subject.pose_writes, writes);
    }

    #[test]
    fn test_large_dt_catches_up() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        playback.start_with_track(track_at(&[0.0, 0.1, 0.2, 0.3, 0.4, 5.0]), &mut subject);

        playback.advance_tick(0.35, &mut subject, &mut signals);

        assert_eq!(playback.cursor(), 3);
        assert_eq!(subject.position.x, 30.0);
        assert_eq!(playback.phase(), PlaybackPhase::Active);
    }

    #[test]
    fn test_stall_lands_on_last_frame_then_ends() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        playback.start_with_track(track_at(&[0.0, 1.0, 2.0]), &mut subject);

        playback.advance_tick(100.0, &mut subject, &mut signals);
        assert_eq!(playback.cursor(), 2);
        assert_eq!(subject.position.x, 20.0);
        assert!(signals.is_empty());

        playback.advance_tick(0.016, &mut subject, &mut signals);
        assert_eq!(signals, vec![ReplayOutcome::Ended]);
    }

    #[test]
    fn test_tied_timestamps_advance_in_order() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        playback.start_with_track(track_at(&[0.0, 1.0, 1.0, 2.0]), &mut subject);

        playback.advance_tick(1.0, &mut subject, &mut signals);
        // Both tied frames are reached; the later-inserted one wins.
        assert_eq!(playback.cursor(), 2);
    }

    #[test]
    fn test_single_frame_track_ends_on_first_tick() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        playback.start_with_track(track_at(&[0.0]), &mut subject);

        playback.advance_tick(0.016, &mut subject, &mut signals);

        assert_eq!(playback.phase(), PlaybackPhase::Ended);
        assert_eq!(signals, vec![ReplayOutcome::Ended]);
        assert_eq!(subject.pose_writes, 0);
    }

    #[test]
    fn test_terminal_frame_fires_died_once() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        let track = ReplayTrack::from_frames(vec![
            frame(0.0, 0.0, false),
            frame(1.0, 0.5, false),
            frame(2.0, 1.0, true),
        ]);
        playback.start_with_track(track, &mut subject);

        for _ in 0..10 {
            playback.advance_tick(0.25, &mut subject, &mut signals);
        }

        assert_eq!(signals, vec![ReplayOutcome::Died]);
        assert_eq!(playback.phase(), PlaybackPhase::DiedDuringReplay);
        assert_eq!(playback.cursor(), 2);
        assert_eq!(subject.position.x, 2.0);
        assert_eq!(playback.elapsed(), 1.0);
    }

    #[test]
    fn test_mid_track_death_stops_at_first_terminal_frame() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        let track = ReplayTrack::from_frames(vec![
            frame(0.0, 0.0, false),
            frame(1.0, 1.0, true),
            frame(2.0, 2.0, false),
            frame(3.0, 3.0, true),
        ]);
        playback.start_with_track(track, &mut subject);

        playback.advance_tick(1.5, &mut subject, &mut signals);
        assert_eq!(playback.cursor(), 1);
        assert_eq!(playback.phase(), PlaybackPhase::DiedDuringReplay);

        playback.advance_tick(5.0, &mut subject, &mut signals);
        assert_eq!(playback.cursor(), 1);
        assert_eq!(signals, vec![ReplayOutcome::Died]);
    }

    #[test]
    fn test_advance_while_idle_is_noop() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();

        playback.advance_tick(1.0, &mut subject, &mut signals);

        assert_eq!(playback.phase(), PlaybackPhase::Idle);
        assert_eq!(playback.elapsed(), 0.0);
        assert_eq!(subject.pose_writes, 0);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_restart_after_finish_reinitializes() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        playback.start_with_track(track_at(&[0.0, 1.0]), &mut subject);
        playback.advance_tick(2.0, &mut subject, &mut signals);
        playback.advance_tick(0.1, &mut subject, &mut signals);
        assert_eq!(playback.phase(), PlaybackPhase::Ended);

        assert!(playback.start_with_track(track_at(&[0.0, 1.0, 2.0]), &mut subject));
        assert_eq!(playback.phase(), PlaybackPhase::Active);
        assert_eq!(playback.cursor(), 0);
        assert_eq!(playback.elapsed(), 0.0);
    }

    #[test]
    fn test_abort_is_silent() {
        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        playback.start_with_track(track_at(&[0.0, 1.0, 2.0]), &mut subject);

        playback.advance_tick(0.5, &mut subject, &mut signals);
        playback.abort();
        playback.advance_tick(5.0, &mut subject, &mut signals);

        assert_eq!(playback.phase(), PlaybackPhase::Idle);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_replays_stored_track() {
        let dir = std::env::temp_dir().join("runner_playback_test_stored");
        let _ = std::fs::remove_dir_all(&dir);
        let store = ReplayStore::new(&dir, "replay.json");
        store.save(&track_at(&[0.0, 0.5])).unwrap();

        let mut playback = ReplayPlayback::new();
        let mut subject = TestSubject::default();
        let mut signals = Vec::new();
        assert!(playback.start_replay(&store, &mut subject).unwrap());

        playback.advance_tick(0.5, &mut subject, &mut signals);
        playback.advance_tick(0.5, &mut subject, &mut signals);

        assert_eq!(signals, vec![ReplayOutcome::Ended]);
        assert_eq!(subject.position.x, 10.0);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
