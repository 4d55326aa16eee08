use crate::app::AppState;
use crate::ui::styles::{error_style, hint_style, success_style};
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = if app.ui_mode.is_input() {
        Line::from(vec![
            Span::raw(" Enter save   "),
            Span::raw("Esc cancel"),
        ])
    } else {
        Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Enter start/stop   "),
            Span::raw("a add   "),
            Span::raw("e edit   "),
            Span::raw("d delete   "),
            Span::raw("c copy   "),
            Span::raw("q quit"),
        ])
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the status line (copy confirmation or diagnostic)
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(status) = &app.status {
        let style = if status.is_error {
            error_style()
        } else {
            success_style()
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {}", status.text), style)));
        f.render_widget(paragraph, area);
    }
}
