use ratatui::style::{Color, Modifier, Style};

/// Harbour-night theme.
///
/// - pale foreground on deep navy
/// - amber for whatever has focus
/// - teal for data, coral for errors
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(12, 18, 32);
    pub const FG: Color = Color::Rgb(214, 222, 235);
    pub const FG_DIM: Color = Color::Rgb(140, 152, 172);
    pub const FG_MUTED: Color = Color::Rgb(84, 94, 112);

    pub const ACCENT_AMBER: Color = Color::Rgb(255, 190, 70);
    pub const ACCENT_TEAL: Color = Color::Rgb(64, 200, 190);
    pub const ACCENT_GREEN: Color = Color::Rgb(120, 220, 120);
    pub const ACCENT_CORAL: Color = Color::Rgb(255, 110, 100);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Panel border, amber when the panel has focus.
    pub fn border(focused: bool) -> Style {
        if focused {
            Style::default().fg(Self::ACCENT_AMBER)
        } else {
            Style::default().fg(Self::FG_MUTED)
        }
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Item under a cursor.
    pub fn cursor() -> Style {
        Style::default()
            .fg(Self::BG)
            .bg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected but not under the cursor.
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    /// Bars, numbers and anything else that is data.
    pub fn data() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn ok() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warn() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_CORAL)
            .add_modifier(Modifier::BOLD)
    }
}
