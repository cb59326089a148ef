use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::{layout, theme::Theme};

const BINDINGS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "move between features, price range and sidebar"),
    ("Left / Right", "features: move cursor  |  range: nudge handle by 1"),
    ("PgUp / PgDn", "range: nudge handle by 10"),
    ("Up / Down", "range: switch handle  |  sidebar: move between fields"),
    ("Space / Enter", "features: toggle column  |  sidebar: toggle river choice"),
    ("0-9 . -", "sidebar: type a value (first key replaces the default)"),
    ("Backspace / Del", "sidebar: delete a character / restore the default"),
    ("Enter on Predict, p", "predict the price for the sidebar values"),
    ("?", "toggle this help"),
    ("q / Esc", "quit"),
];

pub fn draw(f: &mut Frame, area: Rect) {
    let popup = layout::centered(area, 70, 60);

    let mut lines = vec![Line::from("")];
    lines.extend(BINDINGS.iter().map(|(keys, what)| {
        Line::from(vec![
            Span::styled(format!("  {keys:<22}"), Theme::warn()),
            Span::styled(*what, Theme::text()),
        ])
    }));

    let help = Paragraph::new(lines)
        .style(Theme::base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border(true))
                .title(Span::styled("Keys", Theme::title())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}
