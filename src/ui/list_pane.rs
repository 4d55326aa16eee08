use crate::app::{AppState, TaskRow};
use crate::domain::TimerStatus;
use crate::ui::styles::{
    border_style, default_style, running_style, selected_style, stopped_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the activity list
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = app.task_rows();

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(create_task_line(row)).style(default_style()))
        .collect();

    let title = format!(" Activities ({}) ", rows.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .highlight_style(selected_style());

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.selected_index));
    }

    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a task
/// Format: ⏸  Write report   00:12:04
pub fn create_task_line(row: &TaskRow) -> Line<'static> {
    let timer_style = match row.status {
        TimerStatus::Running => running_style(),
        TimerStatus::Stopped => stopped_style(),
    };

    Line::from(vec![
        Span::styled(format!(" {} ", row.status.control_glyph()), timer_style),
        Span::raw(format!(" {}  ", row.title)),
        Span::styled(row.timer_text.clone(), timer_style),
    ])
}
