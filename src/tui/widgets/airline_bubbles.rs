//! Bubble chart of flights per reporting airline

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::{chart_block, render_no_data};
use crate::format::{format_flights, titles, truncate};
use crate::tui::theme::Theme;
use crate::types::YearSummary;

pub const TITLE: &str = titles::AIRLINE_BUBBLES;

/// Bubble glyphs from smallest to largest
const BUBBLES: [char; 4] = ['·', '•', '●', '⬤'];

/// Columns per airline
const COLUMN_WIDTH: u16 = 5;
/// Y axis labels
const AXIS_WIDTH: u16 = 10;
/// Label row + axis line
const FOOTER_ROWS: u16 = 2;

/// Glyph for `flights` relative to the largest airline.
///
/// Bubble area scales with flights, so the radius follows the square root.
pub fn bubble_glyph(flights: f64, max: f64) -> char {
    if max <= 0.0 || flights <= 0.0 {
        return BUBBLES[0];
    }
    let radius = (flights / max).clamp(0.0, 1.0).sqrt();
    let last = BUBBLES.len() - 1;
    BUBBLES[((radius * last as f64).round() as usize).min(last)]
}

/// Row offset from the bottom of a plot `height` rows tall
fn bubble_row(flights: f64, max: f64, height: u16) -> u16 {
    if max <= 0.0 || height == 0 {
        return 0;
    }
    let ratio = (flights / max).clamp(0.0, 1.0);
    (ratio * f64::from(height - 1)).round() as u16
}

/// Bubble chart widget: x = airline, y and glyph size = flights
pub struct AirlineBubbles<'a> {
    summary: &'a YearSummary,
    theme: Theme,
}

impl<'a> AirlineBubbles<'a> {
    pub fn new(summary: &'a YearSummary, theme: Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for AirlineBubbles<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block(TITLE, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let airlines = &self.summary.airlines;
        if airlines.is_empty() {
            render_no_data(inner, buf, self.summary.year, self.theme);
            return;
        }
        if inner.height <= FOOTER_ROWS || inner.width <= AXIS_WIDTH + COLUMN_WIDTH {
            return;
        }

        let plot_height = inner.height - FOOTER_ROWS;
        let plot_x = inner.x + AXIS_WIDTH;
        let axis_y = inner.y + plot_height;
        let label_y = axis_y + 1;
        let capacity = usize::from((inner.width - AXIS_WIDTH) / COLUMN_WIDTH);

        let max = airlines.iter().map(|a| a.flights).fold(0.0_f64, f64::max);
        let muted = Style::default().fg(self.theme.muted());

        // Y axis: max at the top, zero at the bottom
        buf.set_string(
            inner.x,
            inner.y,
            format!("{:>width$} ┤", format_flights(max), width = AXIS_WIDTH as usize - 2),
            muted,
        );
        for y in inner.y + 1..axis_y {
            buf.set_string(plot_x - 1, y, "│", muted);
        }
        buf.set_string(
            inner.x,
            axis_y,
            format!("{:>width$} └", 0, width = AXIS_WIDTH as usize - 2),
            muted,
        );
        buf.set_string(
            plot_x,
            axis_y,
            "─".repeat(usize::from(inner.width - AXIS_WIDTH)),
            muted,
        );

        for (i, airline) in airlines.iter().take(capacity).enumerate() {
            let col_x = plot_x + i as u16 * COLUMN_WIDTH;
            let center = col_x + COLUMN_WIDTH / 2;
            let y = axis_y - 1 - bubble_row(airline.flights, max, plot_height);

            buf.set_string(
                center,
                y,
                bubble_glyph(airline.flights, max).to_string(),
                Style::default()
                    .fg(self.theme.series(i))
                    .add_modifier(Modifier::BOLD),
            );

            let label = truncate(&airline.reporting_airline, usize::from(COLUMN_WIDTH - 1));
            let label_x = col_x + (COLUMN_WIDTH - label.chars().count() as u16) / 2;
            buf.set_string(label_x, label_y, &label, Style::default().fg(self.theme.label()));
        }

        if airlines.len() > capacity {
            let more = format!("+{} more", airlines.len() - capacity);
            let x = inner.x + inner.width.saturating_sub(more.len() as u16);
            buf.set_string(x, inner.y, more, Style::default().fg(self.theme.warn()));
        }
    }
}
