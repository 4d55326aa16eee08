use crate::app::AppState;
use crate::ui::styles::{border_style, title_style, total_style};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the header with the aggregate time across all tasks
pub fn render_header_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let line = Line::from(vec![
        Span::raw("Total time: "),
        Span::styled(app.total_text(), total_style()),
    ]);

    let paragraph = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" ⏱ Tally ", title_style())),
    );

    f.render_widget(paragraph, area);
}
