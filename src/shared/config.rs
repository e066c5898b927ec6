//! Framework Configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration file name searched for by `FrameworkConfig::load`
pub const CONFIG_FILE_NAME: &str = "winframe.toml";

/// Framework configuration loaded from winframe.toml
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkConfig {
    /// Name the native window class is registered under
    #[serde(default = "default_class_name")]
    pub class_name: String,

    /// Debug mode: console logging, detailed fatal dialogs, no crash log
    #[serde(default = "default_debug")]
    pub debug: bool,

    /// Optional log file (in addition to the console in debug mode)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// File written on a fatal error outside debug mode
    #[serde(default = "default_crash_log")]
    pub crash_log: PathBuf,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            class_name: default_class_name(),
            debug: default_debug(),
            log_file: None,
            crash_log: default_crash_log(),
        }
    }
}

fn default_class_name() -> String {
    "winframeWindowClass".to_string()
}

fn default_debug() -> bool {
    cfg!(debug_assertions)
}

fn default_crash_log() -> PathBuf {
    PathBuf::from("Last_Log.txt")
}

impl FrameworkConfig {
    /// Find winframe.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: config dir, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("winframe").join(CONFIG_FILE_NAME)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME))),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        candidates
            .into_iter()
            .flatten()
            .find(|candidate| candidate.exists())
    }

    /// Load configuration from file, returning defaults if not found
    pub fn load() -> Self {
        if let Some(path) = Self::find_config_path() {
            Self::load_from_path(&path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: FrameworkConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}
