//! Keyboard input dispatch: overlay first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Windows reports key releases as well.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.overlay == Overlay::Help {
        app.overlay = Overlay::None;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.running = false,
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('g') | KeyCode::Home => app.move_selection(isize::MIN),
        KeyCode::Char('G') | KeyCode::End => app.move_selection(isize::MAX),
        KeyCode::Char('c') => app.toggle_comparison(),
        KeyCode::Char('t') => app.toggle_table(),
        KeyCode::PageDown if app.show_table => app.scroll_table(10),
        KeyCode::PageUp if app.show_table => app.scroll_table(-10),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('e') => app.export(),
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{config_for, write_csv};
    use crossterm::event::KeyEventState;
    use tradeloom_core::dashboard::Selection;
    use tradeloom_core::font::resolve;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(dir: &std::path::Path) -> AppState {
        AppState::new(config_for(&write_csv(dir)), Selection::default(), resolve(None))
    }

    #[test]
    fn vim_keys_move_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.cursor, 6);
        handle_key(&mut app, press(KeyCode::Char('k')));
        handle_key(&mut app, press(KeyCode::Up));
        assert_eq!(app.cursor, 4);
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, press(KeyCode::End));
        assert_eq!(app.cursor, 6);
    }

    #[test]
    fn toggles_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_key(&mut app, press(KeyCode::Char('c')));
        assert!(app.selection.show_comparison);
        handle_key(&mut app, press(KeyCode::Char('t')));
        assert!(app.show_table);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn release_events_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert!(app.running);
    }

    #[test]
    fn ctrl_c_quits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
        assert!(!app.selection.show_comparison);
    }
}
