//! Line chart of average arrival delay per month

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget},
};

use super::{chart_block, render_no_data};
use crate::format::{month_label, titles};
use crate::tui::theme::Theme;
use crate::types::YearSummary;

pub const TITLE: &str = titles::DELAY_TREND;

const X_TITLE: &str = "Month";
const Y_TITLE: &str = "Arrival Delay (minutes)";

/// (month, average delay) points, skipping months without delay data
pub fn points(summary: &YearSummary) -> Vec<(f64, f64)> {
    summary
        .monthly_delay
        .iter()
        .filter_map(|m| m.avg_arr_delay.map(|d| (f64::from(m.month), d)))
        .collect()
}

/// X bounds cover the full calendar year, widened if the data goes beyond it
fn x_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    points
        .iter()
        .fold([1.0, 12.0], |[lo, hi], (x, _)| [lo.min(*x), hi.max(*x)])
}

/// Y bounds always include zero, padded by 10% of the range
fn y_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let [lo, hi] = points
        .iter()
        .fold([0.0_f64, 0.0_f64], |[lo, hi], (_, y)| [lo.min(*y), hi.max(*y)]);
    let pad = ((hi - lo) * 0.1).max(1.0);
    [
        if lo < 0.0 { lo - pad } else { lo },
        hi + pad,
    ]
}

/// Delay trend chart widget
pub struct DelayTrend<'a> {
    summary: &'a YearSummary,
    theme: Theme,
}

impl<'a> DelayTrend<'a> {
    pub fn new(summary: &'a YearSummary, theme: Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for DelayTrend<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block(TITLE, self.theme);
        let inner = block.inner(area);

        let data = points(self.summary);
        if data.is_empty() {
            block.render(area, buf);
            render_no_data(inner, buf, self.summary.year, self.theme);
            return;
        }

        let missing: Vec<String> = self
            .summary
            .monthly_delay
            .iter()
            .filter(|m| m.avg_arr_delay.is_none())
            .map(|m| month_label(m.month))
            .collect();

        let [chart_area, footer_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(if missing.is_empty() { 0 } else { 1 }),
        ])
        .areas(area);

        let [x_lo, x_hi] = x_bounds(&data);
        let [y_lo, y_hi] = y_bounds(&data);

        let x_labels: Vec<String> = (x_lo as u8..=x_hi as u8)
            .step_by(2)
            .map(|m| m.to_string())
            .collect();
        let y_labels = vec![
            format!("{:.0}", y_lo),
            format!("{:.0}", (y_lo + y_hi) / 2.0),
            format!("{:.0}", y_hi),
        ];

        let datasets = vec![
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.bar()))
                .data(&data),
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(
                    Style::default()
                        .fg(self.theme.accent())
                        .add_modifier(Modifier::BOLD),
                )
                .data(&data),
        ];

        Chart::new(datasets)
            .block(block)
            .legend_position(None)
            .x_axis(
                Axis::default()
                    .title(Span::styled(X_TITLE, Style::default().fg(self.theme.muted())))
                    .style(Style::default().fg(self.theme.muted()))
                    .bounds([x_lo, x_hi])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(Y_TITLE, Style::default().fg(self.theme.muted())))
                    .style(Style::default().fg(self.theme.muted()))
                    .bounds([y_lo, y_hi])
                    .labels(y_labels),
            )
            .render(chart_area, buf);

        if !missing.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!(" No delay data: {}", missing.join(", ")),
                Style::default().fg(self.theme.warn()),
            )))
            .render(footer_area, buf);
        }
    }
}
