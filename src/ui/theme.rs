//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::Color;

/// Slice colours for the statistics chart, assigned by position.
pub const CHART_PALETTE: [Color; 15] = [
    Color::Rgb(0x00, 0x88, 0xFE),
    Color::Rgb(0x00, 0xC4, 0x9F),
    Color::Rgb(0xFF, 0xBB, 0x28),
    Color::Rgb(0xFF, 0x80, 0x42),
    Color::Rgb(0xAF, 0x19, 0xFF),
    Color::Rgb(0xFF, 0x19, 0x7C),
    Color::Rgb(0x19, 0xFF, 0xED),
    Color::Rgb(0x19, 0x7C, 0xFF),
    Color::Rgb(0x80, 0x42, 0xFF),
    Color::Rgb(0xC0, 0xC0, 0xC0),
    Color::Rgb(0x8A, 0x2B, 0xE2),
    Color::Rgb(0xDE, 0xB8, 0x87),
    Color::Rgb(0x5F, 0x9E, 0xA0),
    Color::Rgb(0xD2, 0x69, 0x1E),
    Color::Rgb(0xFF, 0x7F, 0x50),
];

/// Colour for the chart entry at `index`, cycling through the palette.
pub fn palette_color(index: usize) -> Color {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Titles and the active navigation entry.
    pub accent: Color,
    /// Secondary text such as hints and placeholders.
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub input_fg: Color,
    pub input_placeholder: Color,
    /// Text drawn on top of a highlighted background.
    pub selection_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Filled rating stars.
    pub star: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            input_fg: Color::White,
            input_placeholder: Color::DarkGray,
            selection_fg: Color::Black,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            star: Color::Yellow,
        }
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// The active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), Color::Rgb(0x00, 0x88, 0xFE));
        assert_eq!(palette_color(15), palette_color(0));
        assert_eq!(palette_color(16), palette_color(1));
    }

    #[test]
    fn test_theme_is_shared() {
        assert!(std::ptr::eq(theme(), theme()));
    }
}
