use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the prediction sidebar.
const SIDEBAR_WIDTH: u16 = 40;

/// Regions of the page.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub header: Rect,
    pub columns: Rect,
    pub table: Rect,
    pub range: Rect,
    pub histogram: Rect,
    pub form: Rect,
    pub prediction: Rect,
    pub importances: Rect,
    pub events: Rect,
    pub footer: Rect,
}

/// Splits the screen into the page regions.
///
/// Header on top, events and key hints at the bottom, the explorer on the left and the
/// sidebar on the right of the middle band.
pub fn page(area: Rect) -> Page {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(SIDEBAR_WIDTH)])
        .split(rows[1]);

    let explorer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(13),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(cols[0]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(14),
            Constraint::Length(5),
            Constraint::Min(4),
        ])
        .split(cols[1]);

    Page {
        header: rows[0],
        columns: explorer[0],
        table: explorer[1],
        range: explorer[2],
        histogram: explorer[3],
        form: sidebar[0],
        prediction: sidebar[1],
        importances: sidebar[2],
        events: rows[2],
        footer: rows[3],
    }
}

/// A rectangle of the given percentage size centred in `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
