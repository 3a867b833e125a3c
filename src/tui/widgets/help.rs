//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 48;
const POPUP_HEIGHT: u16 = 22;

const NAVIGATION: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Switch chart"),
    ("1-5", "Jump to chart"),
    ("Left/Right or h/l", "Scroll (States)"),
    ("Up/Down or j/k", "Scroll (Hierarchy)"),
];

const YEAR: &[(&str, &str)] = &[
    ("y or /", "Edit year"),
    ("Enter / Esc", "Apply / cancel edit"),
    ("[ ] or - +", "Previous / next year"),
];

const GENERAL: &[(&str, &str)] = &[("q / Esc", "Quit"), ("?", "Toggle help")];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn section(
        &self,
        lines: &mut Vec<Line<'static>>,
        title: &'static str,
        keys: &[(&str, &str)],
        width: u16,
    ) {
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(self.theme.label())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "─".repeat(width as usize),
            Style::default().fg(self.theme.muted()),
        )));
        for (key, desc) in keys {
            lines.push(keybinding(key, desc, self.theme));
        }
        lines.push(Line::from(""));
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let title = format!(" airdash v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from("")];
        self.section(&mut lines, "Navigation", NAVIGATION, inner.width);
        self.section(&mut lines, "Year", YEAR, inner.width);
        self.section(&mut lines, "General", GENERAL, inner.width);
        lines.push(
            Line::from(Span::styled(
                "Press ? to close",
                Style::default().fg(self.theme.muted()),
            ))
            .alignment(Alignment::Center),
        );

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Render a single keybinding line
fn keybinding(key: &str, desc: &str, theme: Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<20}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ])
}
