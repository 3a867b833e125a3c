//! Distance group proportions, drawn as share bars

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{chart_block, render_no_data};
use crate::format::{format_flights, format_percentage_bar, share_percent, titles};
use crate::tui::theme::Theme;
use crate::types::YearSummary;

pub const TITLE: &str = titles::DISTANCE_SHARE;

/// label(10) + bar + pct(8) + flights(14) + gaps
const FIXED_COLUMNS: u16 = 10 + 2 + 8 + 14 + 2;
const MIN_BAR_WIDTH: u16 = 10;
const MAX_BAR_WIDTH: u16 = 50;

/// Pie chart slices as share bars, one row per distance group
pub struct DistanceShare<'a> {
    summary: &'a YearSummary,
    theme: Theme,
}

impl<'a> DistanceShare<'a> {
    pub fn new(summary: &'a YearSummary, theme: Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for DistanceShare<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block(TITLE, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let groups = &self.summary.distance_groups;
        if groups.is_empty() {
            render_no_data(inner, buf, self.summary.year, self.theme);
            return;
        }

        let total: f64 = groups.iter().map(|g| g.flights).sum();
        let bar_width = inner
            .width
            .saturating_sub(FIXED_COLUMNS)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
        let line_width = FIXED_COLUMNS + bar_width;
        let x = inner.x + inner.width.saturating_sub(line_width) / 2;

        // Blank row under the title, one row per slice
        for (i, group) in groups.iter().enumerate() {
            let y = inner.y + 1 + i as u16;
            if y >= inner.y + inner.height {
                break;
            }

            let percent = share_percent(group.flights, total);
            let color = self.theme.series(i);
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>10}", format!("Group {}", group.distance_group)),
                    Style::default()
                        .fg(self.theme.label())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format_percentage_bar(percent, bar_width as usize),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!("{:>7.1}%", percent),
                    Style::default().fg(self.theme.text()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>14}", format!("{} flights", format_flights(group.flights))),
                    Style::default().fg(self.theme.muted()),
                ),
            ]);
            buf.set_line(x, y, &line, inner.width.saturating_sub(x - inner.x));
        }
    }
}
