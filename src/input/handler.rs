use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Handle a terminal event. Returns true when the app should quit.
pub fn handle_event(app: &mut AppState, event: Event) -> Result<bool> {
    match event {
        // Only process key press events (ignore key release)
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::FocusLost => {
            app.suspend();
            Ok(false)
        }
        Event::FocusGained => {
            app.resume()?;
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keyboard input events
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Any key dismisses the last status message
    app.clear_status();

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Start/stop timer
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected()?;
            Ok(false)
        }

        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.edit_selected();
            Ok(false)
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected()?;
            Ok(false)
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.copy_activities();
            Ok(false)
        }

        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding or renaming a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_input()?;
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_input();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.input_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.input_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_quit() {
        let (mut app, _, _) = test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_handle_add_task() {
        let (mut app, _, _) = test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        // 'q' is text while the input has focus
        type_text(&mut app, "quick");
        assert_eq!(app.input, "quick");

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].title, "quick");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_escape_cancels_input() {
        let (mut app, _, _) = test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "nope");

        assert!(!handle_key(&mut app, key(KeyCode::Esc)).unwrap());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn test_handle_navigation_and_toggle() {
        let (mut app, _, _) = test_app();
        app.store.add_or_update_task("one").unwrap();
        app.store.add_or_update_task("two").unwrap();

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.store.get(2).unwrap().is_running());

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_edit_and_delete() {
        let (mut app, _, _) = test_app();
        app.store.add_or_update_task("old").unwrap();

        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingTask);
        for _ in 0..3 {
            handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut app, "new");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.tasks()[0].title, "new");

        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn test_handle_copy_sets_status() {
        let (mut app, _, clipboard) = test_app();
        app.store.add_or_update_task("a").unwrap();

        handle_key(&mut app, key(KeyCode::Char('c'))).unwrap();
        assert!(app.status.is_some());
        assert_eq!(clipboard.contents.borrow().as_deref(), Some("a, 00:00:00"));

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert!(app.status.is_none());
    }

    #[test]
    fn test_focus_events_suspend_and_resume() {
        let (mut app, _, _) = test_app();
        app.store.add_or_update_task("a").unwrap();
        app.toggle_task(1).unwrap();

        handle_event(&mut app, Event::FocusLost).unwrap();
        assert!(app.tickers.is_empty());

        handle_event(&mut app, Event::FocusGained).unwrap();
        assert!(app.tickers.is_active(1));
    }
}
