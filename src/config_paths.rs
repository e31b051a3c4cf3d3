//! Centralized configuration paths for docoutline
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/docoutline/`
//! - Windows: `%APPDATA%\docoutline\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "docoutline";

/// Prefix of the daily-rotated log files (`docoutline.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "docoutline.log";

/// Base config directory for docoutline
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/docoutline`
///   - Else: `~/.config/docoutline`
///
/// Windows:
///   - `%APPDATA%\docoutline`
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

/// `~/.config/docoutline/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/docoutline/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Most recent log file in `logs_dir`, newest date first.
///
/// Falls back to the undated name when no rotated file exists yet.
pub fn log_file() -> Option<PathBuf> {
    newest_log_in(&logs_dir()?)
}

fn newest_log_in(logs_dir: &Path) -> Option<PathBuf> {
    let mut log_files: Vec<PathBuf> = fs::read_dir(logs_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
        })
        .collect();

    // YYYY-MM-DD suffixes sort naturally
    log_files.sort_by(|a, b| b.cmp(a));

    log_files
        .into_iter()
        .next()
        .or_else(|| Some(logs_dir.join(LOG_FILE_PREFIX)))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_log_wins() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "docoutline.log.2026-01-07",
            "docoutline.log.2026-03-01",
            "other.txt",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        assert_eq!(
            newest_log_in(dir.path()),
            Some(dir.path().join("docoutline.log.2026-03-01"))
        );
    }

    #[test]
    fn test_empty_logs_dir_falls_back_to_base_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            newest_log_in(dir.path()),
            Some(dir.path().join(LOG_FILE_PREFIX))
        );
    }
}
