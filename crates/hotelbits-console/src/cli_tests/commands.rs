//! Layout, widgets and prefs commands against a temporary settings file.

use crate::commands::{
    layout_add, layout_remove, layout_reset, layout_show, list_widgets, prefs_set_density,
    prefs_set_theme, prefs_show, CommandError, Context, Result,
};
use hotelbits_console::config::error::ConfigError;
use hotelbits_console::config::schema::Config;
use hotelbits_console::preferences::{Density, ThemePreference};
use std::fs;
use tempfile::TempDir;
use widget_board::LAYOUT_STORAGE_KEY;

fn context() -> (Context, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let ctx = Context::new(Config::default(), Some(dir.path().join("storage.json")));
    (ctx, dir)
}

fn run(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
    let mut out = Vec::new();
    f(&mut out).expect("command succeeds");
    String::from_utf8(out).expect("utf-8")
}

#[test]
fn test_show_default_layout() {
    let (ctx, _dir) = context();
    let out = run(|o| layout_show(&ctx, 1440, false, o));
    assert!(out.starts_with("Layout (default, 7 widgets, 1440px)"));
    let first = out.lines().nth(1).expect("first widget row");
    assert!(first.contains("service-overview"));
    assert!(first.contains("Service overview"));
    assert!(first.ends_with("4x2"));
}

#[test]
fn test_show_json_uses_storage_shape() {
    let (ctx, _dir) = context();
    let out = run(|o| layout_show(&ctx, 400, true, o));
    assert_eq!(
        out.trim(),
        r#"[{"id":"service-overview","columnSpan":4,"rowSpan":2},{"id":"service-health","columnSpan":4,"rowSpan":2},{"id":"events","columnSpan":4,"rowSpan":3}]"#
    );
}

#[test]
fn test_add_persists_immediately() {
    let (ctx, _dir) = context();
    let out = run(|o| layout_add(&ctx, "instance-limits", 1440, o));
    assert_eq!(out.trim(), "Added instance-limits (8 widgets)");

    let raw = fs::read_to_string(&ctx.store_path).expect("store written");
    assert!(raw.contains(LAYOUT_STORAGE_KEY));

    // a stored layout ignores the width
    let out = run(|o| layout_show(&ctx, 320, false, o));
    assert!(out.starts_with("Layout (stored, 8 widgets"));
}

#[test]
fn test_add_unknown_is_an_error() {
    let (ctx, _dir) = context();
    let err = layout_add(&ctx, "ghost-widget", 1440, &mut Vec::new()).expect_err("unknown");
    assert!(matches!(err, CommandError::Board(_)));
    assert!(!ctx.store_path.exists(), "nothing written");
}

#[test]
fn test_remove_missing_is_an_error() {
    let (ctx, _dir) = context();
    let err = layout_remove(&ctx, "instance-limits", &mut Vec::new()).expect_err("absent");
    assert!(matches!(err, CommandError::NotOnBoard(ref id) if id == "instance-limits"));
    assert_eq!(err.to_string(), "Widget not on the board: instance-limits");
}

#[test]
fn test_remove_saves() {
    let (ctx, _dir) = context();
    run(|o| layout_add(&ctx, "alarms", 1440, o));
    let out = run(|o| layout_remove(&ctx, "alarms", o));
    assert!(out.starts_with("Removed alarms"));
    let raw = fs::read_to_string(&ctx.store_path).expect("store written");
    assert!(!raw.contains("alarms"));
}

#[test]
fn test_reset_removes_stored_layout_only() {
    let (ctx, _dir) = context();
    run(|o| layout_add(&ctx, "instance-limits", 1440, o));
    run(|o| prefs_set_theme(&ctx, ThemePreference::Dark, o));
    run(|o| layout_reset(&ctx, o));

    let raw = fs::read_to_string(&ctx.store_path).expect("store kept");
    assert!(!raw.contains(LAYOUT_STORAGE_KEY));
    assert!(raw.contains("theme"));
}

#[test]
fn test_widgets_marks_placed_and_filters() {
    let (ctx, _dir) = context();
    run(|o| layout_remove(&ctx, "instance-hours", o).or(Ok(())));
    run(|o| layout_add(&ctx, "instance-limits", 1440, o));

    let out = run(|o| list_widgets(&ctx, Some("INSTANCE"), o));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|l| l.starts_with("* instance-limits")));

    let out = run(|o| list_widgets(&ctx, None, o));
    assert_eq!(out.lines().count(), 10);
    let metrics = out
        .lines()
        .find(|l| l.contains("operational-metrics"))
        .expect("listed");
    assert!(metrics.starts_with("  operational-metrics"));
    assert!(metrics.ends_with("-x-"));
}

#[test]
fn test_prefs_round_trip() {
    let (ctx, _dir) = context();
    run(|o| prefs_set_theme(&ctx, ThemePreference::Light, o));
    run(|o| prefs_set_density(&ctx, Density::Compact, o));
    let out = run(|o| prefs_show(&ctx, o));
    assert!(out.contains("theme:   light"));
    assert!(out.contains("density: compact"));
    assert!(out.contains("mode:    light"));
}

#[test]
fn test_prefs_do_not_touch_layout() {
    let (ctx, _dir) = context();
    run(|o| prefs_set_density(&ctx, Density::Compact, o));
    let raw = fs::read_to_string(&ctx.store_path).expect("store written");
    assert!(!raw.contains(LAYOUT_STORAGE_KEY));
}

#[test]
fn test_invalid_debounce_fails_before_touching_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = Config::default();
    config.board.persist_debounce = "whenever".to_string();
    let ctx = Context::new(config, Some(dir.path().join("storage.json")));
    let err = layout_add(&ctx, "alarms", 1440, &mut Vec::new()).expect_err("bad config");
    assert!(matches!(
        err,
        CommandError::Config(ConfigError::InvalidDuration { .. })
    ));
    assert!(!ctx.store_path.exists());
}
