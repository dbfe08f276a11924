//! Grid view settings persistence
//!
//! Stores user preferences in `~/.config/tsvgrid/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Settings shared by every open grid view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Show documents as a grid; plain text otherwise
    pub enabled: bool,
    /// Pin the first row as a header (excluded from sort and typing)
    pub treat_first_row_as_header: bool,
    /// Show a 1-based row number gutter
    pub add_serial_index: bool,
    /// Font family for the rendering surface; empty means its default
    pub font_family: String,
    /// Horizontal cell padding in characters
    pub cell_padding: usize,
    /// Quiet period before reacting to external file changes
    pub reload_debounce_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            treat_first_row_as_header: true,
            add_serial_index: false,
            font_family: String::new(),
            cell_padding: 4,
            reload_debounce_ms: 250,
        }
    }
}

/// A boolean setting that can be flipped from a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Enabled,
    Header,
    SerialIndex,
}

impl Toggle {
    pub fn label(self) -> &'static str {
        match self {
            Toggle::Enabled => "Grid view",
            Toggle::Header => "Header row",
            Toggle::SerialIndex => "Row numbers",
        }
    }
}

impl GridConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from an explicit path; missing or malformed files give defaults
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

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
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

    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Enabled => self.enabled,
            Toggle::Header => self.treat_first_row_as_header,
            Toggle::SerialIndex => self.add_serial_index,
        }
    }

    /// Flip a setting, returning its new value
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::Enabled => &mut self.enabled,
            Toggle::Header => &mut self.treat_first_row_as_header,
            Toggle::SerialIndex => &mut self.add_serial_index,
        };
        *flag = !*flag;
        *flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert!(config.enabled);
        assert!(config.treat_first_row_as_header);
        assert!(!config.add_serial_index);
        assert_eq!(config.cell_padding, 4);
        assert_eq!(config.reload_debounce_ms, 250);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: GridConfig = serde_yaml::from_str("add_serial_index: true\n").unwrap();
        assert!(config.add_serial_index);
        assert!(config.enabled);
        assert_eq!(config.font_family, "");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = GridConfig::default();
        config.toggle(Toggle::Header);
        config.cell_padding = 8;
        config.save_to(&path).unwrap();

        assert_eq!(GridConfig::load_from(&path), config);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "enabled: [not a bool").unwrap();
        assert_eq!(GridConfig::load_from(&path), GridConfig::default());
    }

    #[test]
    fn test_toggle_flips() {
        let mut config = GridConfig::default();
        assert!(!config.toggle(Toggle::Enabled));
        assert!(!config.get(Toggle::Enabled));
        assert!(config.toggle(Toggle::SerialIndex));
    }
}
