use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{active_border_style, border_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the activity title input
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, border) = match app.ui_mode {
        UiMode::EditingTask => (" Edit activity ", active_border_style()),
        UiMode::AddingTask => (" New activity ", active_border_style()),
        UiMode::Normal => (" Register activity ", border_style()),
    };

    let line = if app.ui_mode.is_input() {
        Line::from(vec![
            Span::raw("> "),
            Span::raw(app.input.as_str()),
            Span::styled("█", title_style()), // Cursor
        ])
    } else {
        Line::from(Span::styled("press a to add an activity", hint_style()))
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(paragraph, area);
}
