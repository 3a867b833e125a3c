//! Bar chart of total flights per destination state

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph, Widget},
};

use super::{chart_block, render_no_data};
use crate::format::{format_flights, titles};
use crate::tui::theme::Theme;
use crate::types::YearSummary;

pub const TITLE: &str = titles::STATE_BARS;

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;

/// Number of bars that fit in `width` columns (at least one)
pub fn visible_bars(width: u16) -> usize {
    usize::from((width / (BAR_WIDTH + BAR_GAP)).max(1))
}

/// Largest useful scroll offset for `total` bars in `width` columns
pub fn max_scroll(total: usize, width: u16) -> usize {
    total.saturating_sub(visible_bars(width))
}

/// Horizontally scrollable state bar chart
pub struct StateBars<'a> {
    summary: &'a YearSummary,
    scroll: usize,
    theme: Theme,
}

impl<'a> StateBars<'a> {
    pub fn new(summary: &'a YearSummary, theme: Theme) -> Self {
        Self {
            summary,
            scroll: 0,
            theme,
        }
    }

    /// First state shown (clamped at render time)
    pub fn with_scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for StateBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block(TITLE, self.theme);
        let inner = block.inner(area);

        let states = &self.summary.dest_states;
        if states.is_empty() {
            block.render(area, buf);
            render_no_data(inner, buf, self.summary.year, self.theme);
            return;
        }

        let [chart_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let chart_width = chart_area.width.saturating_sub(2);
        let offset = self.scroll.min(max_scroll(states.len(), chart_width));
        let shown = visible_bars(chart_width).min(states.len() - offset);

        let bars: Vec<Bar> = states[offset..offset + shown]
            .iter()
            .map(|s| {
                Bar::default()
                    .value(s.flights.max(0.0).round() as u64)
                    .text_value(format_flights(s.flights))
                    .label(Line::from(s.dest_state.clone()))
                    .style(Style::default().fg(self.theme.bar()))
                    .value_style(
                        Style::default()
                            .fg(self.theme.text())
                            .bg(self.theme.bar())
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();

        BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(BAR_WIDTH)
            .bar_gap(BAR_GAP)
            .label_style(Style::default().fg(self.theme.label()))
            .render(chart_area, buf);

        let left = if offset > 0 { "◀ " } else { "  " };
        let right = if offset + shown < states.len() {
            " ▶"
        } else {
            "  "
        };
        Paragraph::new(Line::from(vec![
            Span::styled(left, Style::default().fg(self.theme.accent())),
            Span::styled(
                format!(
                    "{}-{} of {} states · {} flights",
                    offset + 1,
                    offset + shown,
                    states.len(),
                    format_flights(self.summary.total_flights())
                ),
                Style::default().fg(self.theme.muted()),
            ),
            Span::styled(right, Style::default().fg(self.theme.accent())),
        ]))
        .alignment(Alignment::Center)
        .render(footer_area, buf);
    }
}
