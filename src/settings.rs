//! Persistent settings for the runner
//!
//! Loads where replays are stored and the movement tuning of the runner
//! from a runner_settings.json file in the config directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/runner_settings.json";

/// Default directory for persistent game data (replays)
pub const DEFAULT_DATA_DIR: &str = "saves";

/// Default replay file name inside the data directory
pub const DEFAULT_REPLAY_FILE: &str = "replay.json";

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}
fn default_replay_file_name() -> String {
    DEFAULT_REPLAY_FILE.to_string()
}
fn default_max_speed() -> f32 {
    8.0
}
fn default_acceleration() -> f32 {
    10.0
}
fn default_jump_velocity() -> f32 {
    9.0
}
fn default_jump_cooldown() -> f32 {
    0.1
}
fn default_dead_zone() -> f32 {
    0.1
}
fn default_fall_threshold() -> f32 {
    -5.0
}

/// Settings that survive between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct RunnerSettings {
    /// Directory holding persistent game data
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Replay file name inside `data_dir`
    #[serde(default = "default_replay_file_name")]
    pub replay_file_name: String,
    /// Top horizontal speed (units/s)
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// How quickly velocity approaches the input target
    #[serde(default = "default_acceleration")]
    pub acceleration: f32,
    /// Upward velocity applied on jump
    #[serde(default = "default_jump_velocity")]
    pub jump_velocity: f32,
    /// Minimum seconds between jumps
    #[serde(default = "default_jump_cooldown")]
    pub jump_cooldown: f32,
    /// Input magnitude below which the stick counts as centered
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f32,
    /// Height below which the run ends
    #[serde(default = "default_fall_threshold")]
    pub fall_threshold: f32,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            replay_file_name: default_replay_file_name(),
            max_speed: default_max_speed(),
            acceleration: default_acceleration(),
            jump_velocity: default_jump_velocity(),
            jump_cooldown: default_jump_cooldown(),
            dead_zone: default_dead_zone(),
            fall_threshold: default_fall_threshold(),
        }
    }
}

impl RunnerSettings {
    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        Self::load_from(SETTINGS_FILE)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    Self::sanitized(settings)
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range tuning with defaults
    fn sanitized(mut self) -> Self {
        if !(self.dead_zone > 0.0 && self.dead_zone < 1.0) {
            warn!(
                "dead_zone {} out of range (0, 1), using {}",
                self.dead_zone,
                default_dead_zone()
            );
            self.dead_zone = default_dead_zone();
        }
        self
    }

    /// Apply `--data-dir <dir>` and `--replay-file <name>` overrides
    pub fn apply_args(&mut self, args: &[String]) {
        if let Some(dir) = arg_value(args, "--data-dir") {
            self.data_dir = dir;
        }
        if let Some(name) = arg_value(args, "--replay-file") {
            self.replay_file_name = name;
        }
    }

    /// Save settings to file
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }
}

/// Value following `flag` on the command line
pub fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = RunnerSettings::load_from("config/definitely_not_here.json");
        assert_eq!(settings, RunnerSettings::default());
        assert_eq!(settings.replay_file_name, "replay.json");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = std::env::temp_dir().join("runner_settings_test_partial");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("runner_settings.json");
        fs::write(&path, r#"{ "replay_file_name": "best_run.json", "max_speed": 12.0 }"#).unwrap();

        let settings = RunnerSettings::load_from(&path);
        assert_eq!(settings.replay_file_name, "best_run.json");
        assert_eq!(settings.max_speed, 12.0);
        assert_eq!(settings.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(settings.fall_threshold, -5.0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = std::env::temp_dir().join("runner_settings_test_invalid");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("runner_settings.json");
        fs::write(&path, "{ max_speed: fast }").unwrap();

        assert_eq!(RunnerSettings::load_from(&path), RunnerSettings::default());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_out_of_range_dead_zone_uses_default() {
        let dir = std::env::temp_dir().join("runner_settings_test_dead_zone");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("runner_settings.json");

        for bad in ["0.0", "-0.5", "1.5"] {
            fs::write(&path, format!(r#"{{ "dead_zone": {bad}, "max_speed": 6.0 }}"#)).unwrap();
            let settings = RunnerSettings::load_from(&path);
            assert_eq!(settings.dead_zone, 0.1, "dead_zone {bad}");
            assert_eq!(settings.max_speed, 6.0);
        }

        fs::write(&path, r#"{ "dead_zone": 0.25 }"#).unwrap();
        assert_eq!(RunnerSettings::load_from(&path).dead_zone, 0.25);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join("runner_settings_test_save");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("config/runner_settings.json");
        let settings = RunnerSettings {
            data_dir: "/tmp/runner_data".to_string(),
            jump_velocity: 7.5,
            ..default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(RunnerSettings::load_from(&path), settings);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_arg_overrides() {
        let mut settings = RunnerSettings::default();
        settings.apply_args(&args(&["runner", "--data-dir", "/tmp/x", "--replay-file", "r.json"]));
        assert_eq!(settings.data_dir, "/tmp/x");
        assert_eq!(settings.replay_file_name, "r.json");

        let mut untouched = RunnerSettings::default();
        untouched.apply_args(&args(&["runner", "--data-dir"]));
        assert_eq!(untouched, RunnerSettings::default());
    }
}
