//! Game configuration
//!
//! Read from an optional JSON file. Every field has a default so a partial
//! file (or none at all) still gives a playable setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Looked up in the working directory when no path is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "super_fighter.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Root folder textures are resolved against
    pub content_root: PathBuf,
    /// Where the screen stack is saved; see [`GameConfig::state_dir`]
    pub state_dir: Option<PathBuf>,
    /// Fraction of the viewport kept clear on each side (0.0 - 0.5)
    pub safe_area_margin: f32,
    /// Log the screen stack every update
    pub trace_screens: bool,
    /// Try to restore the saved stack on start
    pub restore_state: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            window_title: "Super Fighter Ultimate X".to_string(),
            window_width: 1280,
            window_height: 720,
            content_root: PathBuf::from("content"),
            state_dir: None,
            safe_area_margin: 0.0,
            trace_screens: false,
            restore_state: true,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path`, or the defaults when the file does not exist
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(GameConfig::default());
        }
        Self::load(path)
    }

    /// The configured state directory, or one under the user's local data dir
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|p| p.join("super_fighter_ultimate").join("screen_manager"))
                .unwrap_or_else(|| PathBuf::from("./screen_manager"))
        })
    }
}
