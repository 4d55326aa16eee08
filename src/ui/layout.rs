use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub list_area: Rect,
    pub input_area: Rect,
    pub status_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Header: total time (3 rows)
/// - Task list (rest)
/// - Title input (3 rows)
/// - Status line (1 row)
/// - Keybindings bar (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        list_area: chunks[1],
        input_area: chunks[2],
        status_area: chunks[3],
        keybindings_area: chunks[4],
    }
}
