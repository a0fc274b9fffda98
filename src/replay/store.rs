//! On-disk persistence for replay tracks.
//!
//! The file is a JSON document `{ "frames": [...] }` where each frame carries
//! `position {x,y,z}`, `rotation {x,y,z,w}`, `isDead` and `time`. Frame order
//! in the array is the playback order.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::data::{ReplayFrame, ReplayTrack};
use crate::settings::RunnerSettings;

/// Errors from reading or writing a replay file.
#[derive(Debug)]
pub enum ReplayStoreError {
    /// Filesystem error (permission denied, disk full, ...).
    Io(std::io::Error),
    /// The track could not be encoded.
    Encode(String),
    /// The file exists but is not a valid replay.
    Decode(String),
}

impl fmt::Display for ReplayStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayStoreError::Io(e) => write!(f, "I/O error: {e}"),
            ReplayStoreError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            ReplayStoreError::Decode(msg) => write!(f, "Corrupt replay file: {msg}"),
        }
    }
}

impl std::error::Error for ReplayStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayStoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReplayStoreError {
    fn from(e: std::io::Error) -> Self {
        ReplayStoreError::Io(e)
    }
}

impl From<serde_json::Error> for ReplayStoreError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            ReplayStoreError::Io(e.into())
        } else {
            ReplayStoreError::Decode(e.to_string())
        }
    }
}

// Wire types. Kept separate from the in-memory types so the file schema
// does not move when engine math types change their serde representation.

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct WireVec3 {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct WireQuat {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireFrame {
    position: WireVec3,
    rotation: WireQuat,
    #[serde(rename = "isDead")]
    is_dead: bool,
    time: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReplayFile {
    frames: Vec<WireFrame>,
}

impl From<&ReplayFrame> for WireFrame {
    fn from(frame: &ReplayFrame) -> Self {
        Self {
            position: WireVec3 {
                x: frame.position.x,
                y: frame.position.y,
                z: frame.position.z,
            },
            rotation: WireQuat {
                x: frame.rotation.x,
                y: frame.rotation.y,
                z: frame.rotation.z,
                w: frame.rotation.w,
            },
            is_dead: frame.is_dead,
            time: frame.time,
        }
    }
}

impl From<WireFrame> for ReplayFrame {
    fn from(wire: WireFrame) -> Self {
        Self {
            position: Vec3::new(wire.position.x, wire.position.y, wire.position.z),
            rotation: Quat::from_xyzw(
                wire.rotation.x,
                wire.rotation.y,
                wire.rotation.z,
                wire.rotation.w,
            ),
            is_dead: wire.is_dead,
            time: wire.time,
        }
    }
}

fn frame_is_finite(frame: &ReplayFrame) -> bool {
    frame.position.is_finite() && frame.rotation.is_finite() && frame.time.is_finite()
}

/// Encode a track into the replay file format.
pub fn encode_track(track: &ReplayTrack) -> Result<Vec<u8>, ReplayStoreError> {
    if let Some(index) = track.frames().iter().position(|f| !frame_is_finite(f)) {
        return Err(ReplayStoreError::Encode(format!(
            "frame {index} contains a non-finite value"
        )));
    }

    let file = ReplayFile {
        frames: track.frames().iter().map(WireFrame::from).collect(),
    };
    serde_json::to_vec(&file).map_err(|e| ReplayStoreError::Encode(e.to_string()))
}

/// Decode a track from the replay file format.
pub fn decode_track(bytes: &[u8]) -> Result<ReplayTrack, ReplayStoreError> {
    let file: ReplayFile = serde_json::from_slice(bytes)?;
    Ok(ReplayTrack::from_frames(
        file.frames.into_iter().map(ReplayFrame::from).collect(),
    ))
}

/// Write `data` to `path` through `{path}.tmp` + rename, so readers observe
/// either the previous file or the complete new one.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Location of the replay file plus the codec that reads and writes it.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ReplayStore {
    path: PathBuf,
}

impl ReplayStore {
    /// Store at `<data_dir>/<file_name>`.
    pub fn new(data_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(file_name),
        }
    }

    /// Store at an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &RunnerSettings) -> Self {
        Self::new(&settings.data_dir, &settings.replay_file_name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Overwrite the replay file with `track`.
    pub fn save(&self, track: &ReplayTrack) -> Result<(), ReplayStoreError> {
        let bytes = encode_track(track)?;
        atomic_write(&self.path, &bytes)?;
        info!(
            "Saved replay: {} frames ({:.2}s) to {}",
            track.len(),
            track.duration(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the replay file. A missing file is an empty track.
    pub fn load(&self) -> Result<ReplayTrack, ReplayStoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No replay file at {}", self.path.display());
                return Ok(ReplayTrack::new());
            }
            Err(e) => return Err(e.into()),
        };

        let track = decode_track(&bytes)?;
        info!(
            "Loaded replay: {} frames ({:.2}s) from {}",
            track.len(),
            track.duration(),
            self.path.display()
        );
        Ok(track)
    }
}
