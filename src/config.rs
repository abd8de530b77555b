//! Engine configuration persistence
//!
//! Stores table engine preferences in `~/.config/tessera/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of batches kept for undo
    pub history_max_size: usize,
    /// Rows of a table created by `insertTable`
    pub default_table_rows: usize,
    /// Columns of a table created by `insertTable`
    pub default_table_columns: usize,
    /// Tab in the last cell appends a row
    pub tab_grows_table: bool,
    /// Removing the only row/column removes the whole table
    /// (otherwise those commands are disabled)
    pub remove_last_removes_table: bool,
    /// Allow tables inside table cells
    pub allow_nested_tables: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_max_size: 1000,
            default_table_rows: 2,
            default_table_columns: 2,
            tab_grows_table: true,
            remove_last_removes_table: false,
            allow_nested_tables: false,
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from an explicit path, or return defaults
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

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
