//! Centralized configuration paths for tsvgrid
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/tsvgrid/`
//! - Windows: `%APPDATA%\tsvgrid\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "tsvgrid";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "tsvgrid.log";

/// Base config directory for tsvgrid
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/tsvgrid`
///   - Else: `~/.config/tsvgrid`
///
/// Windows:
///   - `%APPDATA%\tsvgrid`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/tsvgrid/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/tsvgrid/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Newest `tsvgrid.log.YYYY-MM-DD` in the logs directory
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;

    let newest = fs::read_dir(&logs_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
        })
        // YYYY-MM-DD suffixes sort naturally
        .max();

    newest.or_else(|| Some(logs_dir.join(LOG_FILE_PREFIX)))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    let logs = dir.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
