use super::*;
use crate::tui::test_utils::make_app;
use crossterm::event::KeyEventState;

fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    make_key(code, KeyModifiers::NONE)
}

fn char_key(c: char) -> KeyEvent {
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    make_key(KeyCode::Char(c), modifiers)
}

#[test]
fn test_quit_on_q_and_ctrl_c() {
    let (mut app, _) = make_app();
    assert_eq!(handle_key_event(&mut app, char_key('q')), Action::Quit);
    assert_eq!(
        handle_key_event(&mut app, make_key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Action::Quit
    );
}

#[test]
fn test_ctrl_c_quits_from_overlays() {
    let (mut app, _) = make_app();
    app.open_palette();
    assert_eq!(
        handle_key_event(&mut app, make_key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Action::Quit
    );
}

#[test]
fn test_q_types_into_search_and_palette() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, char_key('/'));
    assert_eq!(handle_key_event(&mut app, char_key('q')), Action::None);
    assert_eq!(app.search, "q");

    handle_key_event(&mut app, key(KeyCode::Esc));
    handle_key_event(&mut app, char_key('a'));
    assert_eq!(handle_key_event(&mut app, char_key('q')), Action::None);
    assert_eq!(app.palette.filter, "q");
}

#[test]
fn test_ctrl_s_focuses_search() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, make_key(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert_eq!(app.focus, Focus::Search);
    for c in "alarm".chars() {
        handle_key_event(&mut app, char_key(c));
    }
    handle_key_event(&mut app, key(KeyCode::Backspace));
    assert_eq!(app.search, "alar");
    handle_key_event(&mut app, key(KeyCode::Enter));
    assert_eq!(app.focus, Focus::Board);
    assert!(app.matches_search(6));
}

#[test]
fn test_control_chars_are_not_typed() {
    let (mut app, _) = make_app();
    let ctrl_s = make_key(KeyCode::Char('s'), KeyModifiers::CONTROL);
    handle_key_event(&mut app, ctrl_s);
    handle_key_event(&mut app, char_key('e'));
    handle_key_event(&mut app, ctrl_s);
    assert_eq!(app.focus, Focus::Search);
    assert_eq!(app.search, "e");

    handle_key_event(&mut app, key(KeyCode::Esc));
    handle_key_event(&mut app, char_key('a'));
    handle_key_event(&mut app, make_key(KeyCode::Char('w'), KeyModifiers::CONTROL));
    assert_eq!(app.focus, Focus::Palette);
    assert_eq!(app.palette.filter, "");
}

#[test]
fn test_navigation_keys() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, key(KeyCode::Tab));
    assert_eq!(app.selected, Some(1));
    handle_key_event(&mut app, key(KeyCode::Right));
    assert_eq!(app.selected, Some(2));
    handle_key_event(&mut app, make_key(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(app.selected, Some(1));
    handle_key_event(&mut app, key(KeyCode::Up));
    assert_eq!(app.selected, Some(0));
}

#[test]
fn test_move_keys_reorder() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, char_key('L'));
    assert_eq!(app.board.layout().ids()[1], "service-overview");
    assert_eq!(app.selected, Some(1));
    handle_key_event(&mut app, char_key('H'));
    assert_eq!(app.board.layout().ids()[0], "service-overview");
}

#[test]
fn test_resize_keys() {
    let (mut app, _) = make_app();
    app.selected = Some(5); // events 2x3
    handle_key_event(&mut app, char_key('+'));
    handle_key_event(&mut app, char_key(']'));
    let events = &app.board.layout().items()[5];
    assert_eq!((events.column_span, events.row_span), (Some(3), Some(4)));

    handle_key_event(&mut app, char_key('-'));
    handle_key_event(&mut app, char_key('['));
    let events = &app.board.layout().items()[5];
    assert_eq!((events.column_span, events.row_span), (Some(2), Some(3)));
}

#[test]
fn test_remove_keys() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, char_key('x'));
    handle_key_event(&mut app, key(KeyCode::Delete));
    assert_eq!(app.board.layout().len(), 5);
}

#[test]
fn test_palette_flow() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, char_key('a'));
    assert_eq!(app.focus, Focus::Palette);
    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key(KeyCode::Enter));
    assert_eq!(app.focus, Focus::Board);
    assert!(app.board.layout().contains("instance-limits"));

    handle_key_event(&mut app, char_key('a'));
    handle_key_event(&mut app, key(KeyCode::Esc));
    assert_eq!(app.focus, Focus::Board);
    assert_eq!(app.board.layout().len(), 8);
}

#[test]
fn test_preference_keys() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, char_key('t'));
    handle_key_event(&mut app, char_key('d'));
    assert_eq!(app.preferences.theme, crate::preferences::ThemePreference::Light);
    assert_eq!(app.preferences.density, crate::preferences::Density::Compact);
}

#[test]
fn test_reset_key() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, char_key('x'));
    handle_key_event(&mut app, char_key('R'));
    assert_eq!(app.board.layout().len(), 7);
}

#[test]
fn test_esc_dismisses_banner_then_clears_selection() {
    let (mut app, _) = make_app();
    handle_key_event(&mut app, key(KeyCode::Esc));
    assert!(app.banner.is_none());
    assert_eq!(app.selected, Some(0));
    handle_key_event(&mut app, key(KeyCode::Esc));
    assert_eq!(app.selected, None);
}

#[test]
fn test_unbound_keys_do_nothing() {
    let (mut app, _) = make_app();
    let before = app.board.layout().clone();
    assert_eq!(handle_key_event(&mut app, char_key('z')), Action::None);
    assert_eq!(handle_key_event(&mut app, key(KeyCode::F(5))), Action::None);
    assert_eq!(app.board.layout(), &before);
}

#[tokio::test]
async fn test_event_handler_ticks() {
    let (_tx, rx) = mpsc::channel(1);
    let handler = EventHandler::new(Duration::from_millis(250), rx);
    assert_eq!(handler.tick.period(), Duration::from_millis(250));
    assert!(handler.profile_open);
}
