//! Replay data structures shared by the recorder, the store and playback.

use bevy::prelude::*;

/// A single captured sample of the runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayFrame {
    /// World position at capture.
    pub position: Vec3,
    /// World rotation at capture.
    pub rotation: Quat,
    /// Whether the runner was dead when this frame was captured.
    pub is_dead: bool,
    /// Seconds since the recording session started.
    pub time: f32,
}

impl ReplayFrame {
    pub fn new(position: Vec3, rotation: Quat, is_dead: bool, time: f32) -> Self {
        Self {
            position,
            rotation,
            is_dead,
            time,
        }
    }
}

/// Ordered frames of one recorded run.
///
/// Insertion order is chronological order. Ties in `time` are legal and are
/// resolved by insertion order, so frames are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayTrack {
    frames: Vec<ReplayFrame>,
}

impl ReplayTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from frames that are already in capture order.
    pub fn from_frames(frames: Vec<ReplayFrame>) -> Self {
        Self { frames }
    }

    /// Append a frame at the end of the track.
    pub fn push(&mut self, frame: ReplayFrame) {
        self.frames.push(frame);
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    pub fn first(&self) -> Option<&ReplayFrame> {
        self.frames.first()
    }

    pub fn last(&self) -> Option<&ReplayFrame> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the final frame, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.frames.len().checked_sub(1)
    }

    /// Timestamp of the final frame (0 for an empty track).
    pub fn duration(&self) -> f32 {
        self.frames.last().map(|f| f.time).unwrap_or(0.0)
    }

    /// First frame captured while the runner was dead.
    pub fn first_death(&self) -> Option<(usize, &ReplayFrame)> {
        self.frames.iter().enumerate().find(|(_, f)| f.is_dead)
    }

    /// Whether timestamps never decrease along the track.
    pub fn is_chronological(&self) -> bool {
        self.frames.windows(2).all(|w| w[0].time <= w[1].time)
    }

    /// Human-readable summary: frame count, duration, death and end poses.
    pub fn format_summary(&self) -> String {
        let Some(first) = self.first() else {
            return "Frames:   0 (empty replay)".to_string();
        };

        let mut out = format!(
            "Frames:   {}\nDuration: {:.2}s\n",
            self.len(),
            self.duration()
        );
        match self.first_death() {
            Some((index, frame)) => out.push_str(&format!(
                "Death:    frame {} at {:.2}s\n",
                index, frame.time
            )),
            None => out.push_str("Death:    none\n"),
        }
        out.push_str(&format!("First:    {}\n", format_pose(first)));
        if let Some(last) = self.last() {
            out.push_str(&format!("Last:     {}", format_pose(last)));
        }
        out
    }
}

fn format_pose(frame: &ReplayFrame) -> String {
    let p = frame.position;
    let r = frame.rotation;
    format!(
        "t={:.2}s pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3}, {:.3})",
        frame.time, p.x, p.y, p.z, r.x, r.y, r.z, r.w
    )
}
