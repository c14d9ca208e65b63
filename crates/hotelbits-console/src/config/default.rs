//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# HotelBits Console Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/hotelbits/config.toml

# ==============================================================================
# Board
# ==============================================================================

[board]

# Quiet period after the last layout change before it is written to disk.
# Several edits inside this window are saved as one write.
# Examples: "250ms", "500ms", "1s"
persist_debounce = "500ms"

# Quiet period after a terminal resize before the board picks up the new
# width. Only affects which default layout a reset produces.
resize_debounce = "100ms"

# Key under which the layout is stored in the settings file.
# Changing it starts from the default layout without touching the old one.
storage_key = "dashboard-layout-v11"

# Settings file holding the layout, theme and density.
# Empty means $XDG_DATA_HOME/hotelbits/storage.json
store_path = ""

# ==============================================================================
# Terminal UI
# ==============================================================================

[tui]

# Redraw and save-check interval.
tick_rate = "100ms"

# How long the header shows the profile as loading.
profile_delay = "3s"

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Verbosity when HOTELBITS_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"

# Log file used while the TUI owns the screen. Other commands log to stderr.
# Empty means $XDG_DATA_HOME/hotelbits/hotelbits.log
file = ""
"#;

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    Ok(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    xdg::ensure_config_dir().map_err(write_error)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;
    use serial_test::serial;

    /// Run closure with `XDG_CONFIG_HOME` temporarily pointed at `dir`.
    fn with_xdg_config<F: FnOnce()>(dir: &Path, f: F) {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", dir);
        f();
        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    // -- Template validity --------------------------------------------------

    #[test]
    fn template_values_match_config_default() {
        let from_template: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(from_template, Config::default());
    }

    #[test]
    fn template_contains_all_section_headers() {
        for header in ["[board]", "[tui]", "[logging]"] {
            assert!(
                DEFAULT_CONFIG_TEMPLATE.contains(header),
                "missing {header} section"
            );
        }
    }

    #[test]
    fn template_is_commented() {
        let comment_lines = DEFAULT_CONFIG_TEMPLATE
            .lines()
            .filter(|l| l.trim_start().starts_with('#'))
            .count();
        assert!(comment_lines > 20, "expected >20 comment lines, got {comment_lines}");
    }

    // -- create_default_config ----------------------------------------------

    #[test]
    #[serial]
    fn create_writes_template() {
        let dir = tempfile::tempdir().expect("temp dir");
        with_xdg_config(dir.path(), || {
            let path = create_default_config(false).expect("created");
            assert_eq!(path, dir.path().join("hotelbits/config.toml"));
            let written = fs::read_to_string(&path).expect("read back");
            assert_eq!(written, DEFAULT_CONFIG_TEMPLATE);
        });
    }

    #[test]
    #[serial]
    fn create_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().expect("temp dir");
        with_xdg_config(dir.path(), || {
            create_default_config(false).expect("first");
            let err = create_default_config(false).expect_err("second");
            assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        });
    }

    #[test]
    #[serial]
    fn create_with_force_backs_up_existing() {
        let dir = tempfile::tempdir().expect("temp dir");
        with_xdg_config(dir.path(), || {
            let path = create_default_config(false).expect("first");
            fs::write(&path, "[tui]\ntick_rate = \"1s\"\n").expect("edit");

            create_default_config(true).expect("forced");
            let backup = path.with_extension("toml.backup");
            assert_eq!(
                fs::read_to_string(backup).expect("backup exists"),
                "[tui]\ntick_rate = \"1s\"\n"
            );
            assert_eq!(
                fs::read_to_string(&path).expect("fresh"),
                DEFAULT_CONFIG_TEMPLATE
            );
        });
    }

    #[test]
    #[cfg(unix)]
    #[serial]
    fn created_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().expect("temp dir");
        with_xdg_config(dir.path(), || {
            let path = create_default_config(false).expect("created");
            let mode = fs::metadata(path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        });
    }
}
