//! Month → destination state tree (sunburst rings flattened into rows)

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{chart_block, render_no_data};
use crate::format::{
    format_flights, format_percentage_bar, month_label, share_percent, titles, truncate,
};
use crate::tui::theme::Theme;
use crate::types::YearSummary;

pub const TITLE: &str = titles::HIERARCHY;

const NAME_WIDTH: usize = 22;
const SHARE_BAR_WIDTH: usize = 16;

/// Rows the tree occupies: one per month plus one per (month, state) leaf
pub fn total_rows(summary: &YearSummary) -> usize {
    summary.hierarchy().len() + summary.month_states.len()
}

/// Largest useful scroll offset for a viewport `height` rows tall
pub fn max_scroll(summary: &YearSummary, height: u16) -> usize {
    total_rows(summary).saturating_sub(usize::from(height))
}

/// Vertically scrollable hierarchy tree
pub struct HierarchyTree<'a> {
    summary: &'a YearSummary,
    scroll: usize,
    theme: Theme,
}

impl<'a> HierarchyTree<'a> {
    pub fn new(summary: &'a YearSummary, theme: Theme) -> Self {
        Self {
            summary,
            scroll: 0,
            theme,
        }
    }

    /// First row shown (clamped at render time)
    pub fn with_scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn rows(&self) -> Vec<Line<'static>> {
        let total = self.summary.hierarchy_total();
        let mut rows = Vec::new();

        for (i, branch) in self.summary.hierarchy().iter().enumerate() {
            let color = self.theme.series(i);
            let share = share_percent(branch.flights, total);
            rows.push(Line::from(vec![
                Span::styled(
                    format!("▾ {:<width$}", month_label(branch.month), width = NAME_WIDTH + 3),
                    Style::default()
                        .fg(self.theme.label())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:>10}", format_flights(branch.flights)),
                    Style::default().fg(self.theme.text()),
                ),
                Span::styled(
                    format!("{:>7.1}%  ", share),
                    Style::default().fg(self.theme.text()),
                ),
                Span::styled(
                    format_percentage_bar(share, SHARE_BAR_WIDTH),
                    Style::default().fg(color),
                ),
            ]));

            let last = branch.states.len().saturating_sub(1);
            for (j, leaf) in branch.states.iter().enumerate() {
                let connector = if j == last { "└─" } else { "├─" };
                let share = share_percent(leaf.flights, branch.flights);
                rows.push(Line::from(vec![
                    Span::styled(
                        format!("  {} ", connector),
                        Style::default().fg(self.theme.muted()),
                    ),
                    Span::styled(
                        format!(
                            "{:<width$}",
                            truncate(&leaf.dest_state_name, NAME_WIDTH),
                            width = NAME_WIDTH
                        ),
                        Style::default().fg(self.theme.text()),
                    ),
                    Span::styled(
                        format!("{:>10}", format_flights(leaf.flights)),
                        Style::default().fg(self.theme.muted()),
                    ),
                    Span::styled(
                        format!("{:>7.1}%  ", share),
                        Style::default().fg(self.theme.muted()),
                    ),
                    Span::styled(
                        format_percentage_bar(share, SHARE_BAR_WIDTH),
                        Style::default().fg(color).add_modifier(Modifier::DIM),
                    ),
                ]));
            }
        }

        rows
    }
}

impl Widget for HierarchyTree<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block(TITLE, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.summary.month_states.is_empty() {
            render_no_data(inner, buf, self.summary.year, self.theme);
            return;
        }

        let rows = self.rows();
        let offset = self.scroll.min(max_scroll(self.summary, inner.height));

        for (i, row) in rows.iter().skip(offset).take(usize::from(inner.height)).enumerate() {
            buf.set_line(inner.x + 1, inner.y + i as u16, row, inner.width.saturating_sub(1));
        }

        // Scroll position marker on the right border
        if rows.len() > usize::from(inner.height) && inner.height > 0 {
            let track = usize::from(inner.height - 1);
            let pos = offset * track / max_scroll(self.summary, inner.height).max(1);
            buf.set_string(
                area.x + area.width.saturating_sub(1),
                inner.y + pos as u16,
                "█",
                Style::default().fg(self.theme.accent()),
            );
        }
    }
}
