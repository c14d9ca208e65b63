//! CLI argument parsing tests.

use crate::{Cli, Commands, ConfigAction, LayoutAction, PrefsAction};
use clap::{CommandFactory, Parser};
use hotelbits_console::preferences::{Density, ThemePreference};
use std::path::PathBuf;

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn test_tui_store_defaults_to_config() {
    let cli = Cli::try_parse_from(["hotelbits", "tui"]).unwrap();
    match cli.command {
        Commands::Tui { store } => assert_eq!(store, None),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_tui_custom_store() {
    let cli = Cli::try_parse_from(["hotelbits", "tui", "--store", "/tmp/board.json"]).unwrap();
    match cli.command {
        Commands::Tui { store } => assert_eq!(store, Some(PathBuf::from("/tmp/board.json"))),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_requires_action() {
    assert!(Cli::try_parse_from(["hotelbits", "layout"]).is_err());
}

#[test]
fn test_layout_show_flags() {
    let cli = Cli::try_parse_from(["hotelbits", "layout", "show", "--width", "900", "--json"])
        .unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Show { width, json },
            store,
        } => {
            assert_eq!(width, Some(900));
            assert!(json);
            assert_eq!(store, None);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_store_is_global() {
    // --store may follow the action
    let cli = Cli::try_parse_from([
        "hotelbits",
        "layout",
        "add",
        "alarms",
        "--store",
        "/tmp/s.json",
    ])
    .unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Add { id, width },
            store,
        } => {
            assert_eq!(id, "alarms");
            assert_eq!(width, None);
            assert_eq!(store, Some(PathBuf::from("/tmp/s.json")));
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_add_requires_id() {
    assert!(Cli::try_parse_from(["hotelbits", "layout", "add"]).is_err());
}

#[test]
fn test_layout_width_must_be_number() {
    assert!(Cli::try_parse_from(["hotelbits", "layout", "show", "--width", "wide"]).is_err());
}

#[test]
fn test_prefs_theme_values() {
    let cli = Cli::try_parse_from(["hotelbits", "prefs", "theme", "dark"]).unwrap();
    match cli.command {
        Commands::Prefs {
            action: PrefsAction::Theme { value },
            ..
        } => assert_eq!(value, ThemePreference::Dark),
        _ => panic!("unexpected command variant"),
    }
    assert!(Cli::try_parse_from(["hotelbits", "prefs", "theme", "sepia"]).is_err());
}

#[test]
fn test_prefs_density_values() {
    let cli = Cli::try_parse_from(["hotelbits", "prefs", "density", "compact"]).unwrap();
    match cli.command {
        Commands::Prefs {
            action: PrefsAction::Density { value },
            ..
        } => assert_eq!(value, Density::Compact),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_widgets_filter() {
    let cli = Cli::try_parse_from(["hotelbits", "widgets", "--filter", "instance"]).unwrap();
    match cli.command {
        Commands::Widgets { filter, .. } => assert_eq!(filter.as_deref(), Some("instance")),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_init_force_default_false() {
    let cli = Cli::try_parse_from(["hotelbits", "config", "init"]).unwrap();
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(!force),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_path_and_validate_parse() {
    assert!(matches!(
        Cli::try_parse_from(["hotelbits", "config", "path"]).unwrap().command,
        Commands::Config {
            action: ConfigAction::Path
        }
    ));
    assert!(matches!(
        Cli::try_parse_from(["hotelbits", "config", "validate"]).unwrap().command,
        Commands::Config {
            action: ConfigAction::Validate
        }
    ));
}
