//! Tab bar widget for chart navigation

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// One tab per chart, in dashboard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    DelayTrend,
    Distance,
    States,
    Airlines,
    Hierarchy,
}

impl Tab {
    /// Get the display label for this tab
    pub fn label(self) -> &'static str {
        match self {
            Self::DelayTrend => "Delay Trend",
            Self::Distance => "Distance",
            Self::States => "States",
            Self::Airlines => "Airlines",
            Self::Hierarchy => "Hierarchy",
        }
    }

    /// Get all tabs in order
    pub fn all() -> &'static [Tab] {
        &[
            Tab::DelayTrend,
            Tab::Distance,
            Tab::States,
            Tab::Airlines,
            Tab::Hierarchy,
        ]
    }

    fn index(self) -> usize {
        Self::all().iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Get the next tab (wrapping)
    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Get the previous tab (wrapping)
    pub fn prev(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    /// Get tab from number key (1-5)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=5 => Some(Self::all()[(n - 1) as usize]),
            _ => None,
        }
    }
}

/// Tab bar widget showing available charts
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Calculate total width of all tabs for centering
        let total_width: u16 = Tab::all()
            .iter()
            .map(|tab| {
                let label = tab.label();
                let display_len = if *tab == self.selected {
                    label.len() + 2 // "[label]"
                } else {
                    label.len()
                };
                display_len as u16 + 2 // + spacing
            })
            .sum::<u16>()
            .saturating_sub(2); // Remove trailing spacing

        // Center the tabs
        let start_x = area.x + (area.width.saturating_sub(total_width)) / 2;
        let mut x = start_x;

        for tab in Tab::all() {
            let is_selected = *tab == self.selected;
            let label = tab.label();

            let display = if is_selected {
                format!("[{}]", label)
            } else {
                label.to_string()
            };

            let display_len = display.len() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            let style = if is_selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, &display, style);
            x += display_len + 2;
        }
    }
}
