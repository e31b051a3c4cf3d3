//! Outline configuration persistence
//!
//! Stores user preferences in `~/.config/docoutline/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::outline::{BuildOptions, DEFAULT_EXPAND_DEPTH};

/// Default delay between a file change and the refresh it triggers
pub const DEFAULT_WATCH_DEBOUNCE_MS: u64 = 300;

/// Outline configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineConfig {
    /// Only list declarations that carry a documentation comment
    #[serde(default)]
    pub only_documented: bool,
    /// Levels expanded when an outline is first shown
    #[serde(default = "default_expand_depth")]
    pub expand_depth: usize,
    /// Print tag lines under each node in tree output
    #[serde(default)]
    pub show_tooltips: bool,
    #[serde(default = "default_watch_debounce_ms")]
    pub watch_debounce_ms: u64,
}

fn default_expand_depth() -> usize {
    DEFAULT_EXPAND_DEPTH
}

fn default_watch_debounce_ms() -> u64 {
    DEFAULT_WATCH_DEBOUNCE_MS
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            only_documented: false,
            expand_depth: default_expand_depth(),
            show_tooltips: false,
            watch_debounce_ms: default_watch_debounce_ms(),
        }
    }
}

impl OutlineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = self.to_yaml()?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// The YAML text `save` writes
    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            only_documented: self.only_documented,
        }
    }
}
