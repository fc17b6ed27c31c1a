//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ClipzoomError, ClipzoomResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where projects are stored.
    pub projects_dir: PathBuf,

    /// Output settings applied to newly created projects.
    pub output: OutputDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default output parameters for new projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDefaults {
    /// Output width in pixels.
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,

    /// Output frame rate.
    pub fps: u32,

    /// Zoom intensity used by the auto-zoom scheduler (2.0 = half-size box).
    pub max_zoom: f64,

    /// Whether auto-zoom keyframes are generated for fresh recordings.
    pub auto_zoom: bool,

    /// Padding around the content as a fraction of the output size, per side.
    pub padding: f64,

    /// Background color as hex string.
    pub background: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clipzoom=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            projects_dir: dirs_default_projects(),
            output: OutputDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OutputDefaults {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
            max_zoom: 2.0,
            auto_zoom: true,
            padding: 0.0,
            background: "#1a1a1a".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location. `Ok(None)` when no file exists.
    pub fn try_load() -> ClipzoomResult<Option<Self>> {
        Self::try_load_from(Self::path())
    }

    /// Like [`AppConfig::load_from`], but a missing file is `Ok(None)`.
    pub fn try_load_from(path: impl AsRef<Path>) -> ClipzoomResult<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(path).map(Some)
    }

    /// Standard config file location.
    pub fn path() -> PathBuf {
        config_file_path()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> ClipzoomResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClipzoomError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> ClipzoomResult<()> {
        self.save_to(config_file_path())
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ClipzoomResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject output defaults the scheduler and layout cannot use.
    pub fn validate(&self) -> ClipzoomResult<()> {
        let output = &self.output;
        if output.width == 0 || output.height == 0 {
            return Err(ClipzoomError::config(format!(
                "output size must be non-zero, got {}x{}",
                output.width, output.height
            )));
        }
        if !(output.max_zoom.is_finite() && output.max_zoom >= 1.0) {
            return Err(ClipzoomError::config(format!(
                "max_zoom must be >= 1.0, got {}",
                output.max_zoom
            )));
        }
        if !(0.0..0.5).contains(&output.padding) {
            return Err(ClipzoomError::config(format!(
                "padding must be in [0.0, 0.5), got {}",
                output.padding
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clipzoom").join("config.json")
}

/// Default projects directory.
fn dirs_default_projects() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("clipzoom").join("projects")
}
