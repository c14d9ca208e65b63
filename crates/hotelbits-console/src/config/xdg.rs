//! Platform-aware path resolution for hotelbits.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/hotelbits` or `~/.config/hotelbits`
//! - Data (settings store, TUI log): `$XDG_DATA_HOME/hotelbits` or `~/.local/share/hotelbits`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config and data: `~/Library/Application Support/hotelbits`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "hotelbits";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/hotelbits` (if env var set, any platform)
/// 2. Platform default
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = non_empty_var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home().join(".config")
    }
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory holding the settings store and the TUI log.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/hotelbits` (if env var set, any platform)
/// 2. Platform default
pub fn data_dir() -> PathBuf {
    if let Some(xdg) = non_empty_var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_data_dir().join(APP_NAME)
}

fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().unwrap_or_else(|| home().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home().join(".local").join("share")
    }
}

/// Default settings store file.
pub fn store_path() -> PathBuf {
    data_dir().join("storage.json")
}

/// Default TUI log file.
pub fn log_path() -> PathBuf {
    data_dir().join("hotelbits.log")
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else if path == "~" {
        home()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

// Working directory when no home can be determined.
fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
