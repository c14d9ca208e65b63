use super::*;
use crate::preferences::{Density, ThemePreference, DENSITY_KEY, THEME_KEY};
use crate::profile::Profile;

#[test]
fn test_app_new_defaults() {
    let (app, _) = make_app();
    assert!(!app.should_quit);
    assert_eq!(app.focus, Focus::Board);
    assert_eq!(app.selected, Some(0));
    assert!(app.search.is_empty());
    assert_eq!(app.profile, ProfileState::Loading);
    assert_eq!(app.banner.as_deref(), Some(SYNC_BANNER));
    assert_eq!(app.board.layout().len(), 7);
    assert_eq!(app.preferences, Preferences::default());
}

#[test]
fn test_app_reads_preferences_from_store() {
    let store = MemoryStore::new()
        .with(THEME_KEY, "light")
        .with(DENSITY_KEY, "compact");
    let (app, _) = make_app_with_store(store, WIDE_PX);
    assert_eq!(app.preferences.theme, ThemePreference::Light);
    assert_eq!(app.preferences.density, Density::Compact);
    assert_eq!(app.mode(), Mode::Light);
}

#[test]
fn test_empty_stored_board_has_no_selection() {
    let store = MemoryStore::new().with(LAYOUT_STORAGE_KEY, "[]");
    let (mut app, _) = make_app_with_store(store, WIDE_PX);
    assert_eq!(app.selected, None);
    app.select_next();
    assert_eq!(app.selected, None);
    app.remove_selected();
    assert!(app.board.layout().is_empty());
}

#[test]
fn test_viewport_width_scales_columns() {
    assert_eq!(viewport_width(80), 640);
    assert_eq!(viewport_width(150), 1200);
}

#[test]
fn test_status_message_expires() {
    let (mut app, clock) = make_app();
    app.flash("hello");
    assert_eq!(app.active_status_message(), Some("hello"));

    clock.advance(STATUS_MESSAGE_TTL);
    assert_eq!(app.active_status_message(), None);
    assert!(app.on_tick(), "expiry is a visible change");
    assert!(app.status_message.is_none());
}

#[test]
fn test_resize_is_debounced() {
    let (mut app, clock) = make_app();
    app.on_resize(80);
    app.on_resize(90);
    clock.advance(Duration::from_millis(99));
    app.on_tick();
    assert_eq!(app.board.viewport_width(), WIDE_PX);

    clock.advance(Duration::from_millis(1));
    app.on_tick();
    assert_eq!(app.board.viewport_width(), 720);
    // the live layout is untouched by a resize
    assert_eq!(app.board.layout().len(), 7);
}

#[test]
fn test_reset_after_resize_uses_new_width() {
    let (mut app, clock) = make_app();
    app.on_resize(60);
    clock.advance(Duration::from_millis(100));
    app.on_tick();
    app.reset_board();
    // 480px is the narrow tier
    assert_eq!(
        app.board.layout().ids(),
        vec!["service-overview", "service-health", "events"]
    );
    assert_eq!(app.selected, Some(0));
}

#[test]
fn test_tick_persists_after_debounce() {
    let (mut app, clock) = make_app();
    app.remove_selected();
    assert_eq!(app.board.state(), BoardState::Dirty);

    clock.advance(PERSIST_DEBOUNCE);
    assert!(app.on_tick(), "write is a visible change");
    assert_eq!(app.board.state(), BoardState::Persisted);
    let stored = app
        .board
        .store()
        .get(LAYOUT_STORAGE_KEY)
        .expect("memory store")
        .expect("written");
    assert!(!stored.contains("service-overview"));
}

#[test]
fn test_shutdown_writes_pending_change_without_waiting() {
    let (mut app, _clock) = make_app();
    app.remove_selected();
    assert_eq!(app.board.state(), BoardState::Dirty);

    // no time passes: the debounce has not elapsed
    assert!(app.shutdown());
    let stored = app
        .board
        .store()
        .get(LAYOUT_STORAGE_KEY)
        .expect("memory store")
        .expect("written on shutdown");
    assert!(!stored.contains("service-overview"));
    assert!(app.board.next_deadline().is_none());

    assert!(!app.shutdown(), "nothing left to write");
}

#[test]
fn test_profile_state_label() {
    let (mut app, _) = make_app();
    app.profile = ProfileState::Ready(Profile::operator());
    assert_eq!(app.profile.label(), "Carlos Ruiz / Admin");
}

#[test]
fn test_dismiss_banner_once() {
    let (mut app, _) = make_app();
    assert!(app.dismiss_banner());
    assert!(!app.dismiss_banner());
}
