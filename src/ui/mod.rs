pub mod header_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::AppState;
use header_pane::render_header_pane;
use input_form::render_input_form;
use keybindings::{render_keybindings, render_status_line};
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;

/// Main render function - draws the entire UI from the current state
pub fn render(f: &mut Frame, app: &AppState) {
    let layout = create_layout(f.size());

    render_header_pane(f, app, layout.header_area);
    render_list_pane(f, app, layout.list_area);
    render_input_form(f, app, layout.input_area);
    render_status_line(f, app, layout.status_area);
    render_keybindings(f, app, layout.keybindings_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|cells| cells.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_shows_tasks_and_total() {
        let (mut app, clock, _) = test_app();
        app.store.add_or_update_task("Write report").unwrap();
        app.toggle_task(1).unwrap();
        clock.advance_ms(2_000);
        app.toggle_task(1).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Write report"));
        assert!(text.contains("Total time: 00:00:02"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let (mut app, _, _) = test_app();
        app.store.add_or_update_task("a").unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let first = screen_text(&terminal);
        terminal.draw(|f| render(f, &app)).unwrap();

        assert_eq!(first, screen_text(&terminal));
    }

    #[test]
    fn test_render_after_delete_hides_task() {
        let (mut app, _, _) = test_app();
        app.store.add_or_update_task("Vanishing").unwrap();
        app.delete_task(1).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(!screen_text(&terminal).contains("Vanishing"));
    }
}
