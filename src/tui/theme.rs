//! Terminal theme detection and color definitions

use ratatui::style::Color;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Slice/bubble colors for dark backgrounds
const DARK_SERIES: [Color; 8] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::LightBlue,
    Color::LightRed,
    Color::Indexed(208), // orange
    Color::Indexed(141), // lavender
];

/// Slice/bubble colors for light backgrounds (ANSI 256, darker tones)
const LIGHT_SERIES: [Color; 8] = [
    Color::Indexed(25),
    Color::Indexed(22),
    Color::Indexed(130),
    Color::Indexed(90),
    Color::Indexed(31),
    Color::Indexed(124),
    Color::Indexed(166),
    Color::Indexed(55),
];

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys, interactive elements)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Dashboard title color
    pub fn title(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(180), // warm tan
            Self::Light => Color::Indexed(95),  // brown (ANSI 256)
        }
    }

    /// Year and month labels
    pub fn label(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Line/bar color
    pub fn bar(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Error/negative indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Warning text (stale cache, skipped rows)
    pub fn warn(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(208),  // orange (ANSI 256)
            Self::Light => Color::Indexed(166), // dark orange (ANSI 256)
        }
    }

    /// Categorical color for the n-th series (wraps around)
    pub fn series(self, index: usize) -> Color {
        let palette = match self {
            Self::Dark => &DARK_SERIES,
            Self::Light => &LIGHT_SERIES,
        };
        palette[index % palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors() {
        let t = Theme::Dark;
        assert_eq!(t.text(), Color::White);
        assert_eq!(t.accent(), Color::Cyan);
        assert_eq!(t.muted(), Color::DarkGray);
        assert_eq!(t.label(), Color::Yellow);
        assert_eq!(t.bar(), Color::Green);
        assert_eq!(t.error(), Color::Red);
        assert_eq!(t.warn(), Color::Indexed(208));
    }

    #[test]
    fn test_light_theme_colors() {
        let t = Theme::Light;
        assert_eq!(t.text(), Color::Black);
        assert_eq!(t.accent(), Color::Indexed(25));
        assert_eq!(t.muted(), Color::Gray);
        assert_eq!(t.label(), Color::Indexed(130));
        assert_eq!(t.bar(), Color::Indexed(22));
        assert_eq!(t.error(), Color::Indexed(124));
        assert_eq!(t.warn(), Color::Indexed(166));
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_series_wraps() {
        let t = Theme::Dark;
        assert_eq!(t.series(0), Color::Cyan);
        assert_eq!(t.series(8), t.series(0));
        assert_eq!(Theme::Light.series(9), Theme::Light.series(1));
    }
}
