//! Debug logging configuration shared across binaries.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEBUG_LOG_SETTINGS_FILE: &str = "config/debug_logging.json";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugLogConfig {
    pub enabled: bool,
    /// Extra `tracing` filter directives appended to the default filter
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for DebugLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            filter: None,
        }
    }
}

impl DebugLogConfig {
    pub fn load() -> Self {
        let path = Path::new(DEBUG_LOG_SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn enabled_from_args(args: &[String]) -> bool {
        args.iter().any(|arg| arg == "--debug-log")
    }

    pub fn load_with_args(args: &[String]) -> Self {
        let mut config = Self::load();
        if Self::enabled_from_args(args) {
            config.enabled = true;
        }
        config
    }

    /// Filter string for the log plugin
    pub fn filter(&self) -> String {
        let mut filter = if self.enabled {
            "wgpu=error,naga=warn,runner=debug".to_string()
        } else {
            "wgpu=error,naga=warn".to_string()
        };
        if let Some(extra) = &self.filter {
            filter.push(',');
            filter.push_str(extra);
        }
        filter
    }

    pub fn log_plugin(&self) -> LogPlugin {
        LogPlugin {
            level: Level::INFO,
            filter: self.filter(),
            ..Default::default()
        }
    }
}
