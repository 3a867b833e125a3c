//! TUI widgets

pub mod airline_bubbles;
pub mod delay_trend;
pub mod distance_share;
pub mod header;
pub mod help;
pub mod hierarchy;
pub mod loading;
pub mod state_bars;
pub mod tabs;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Bordered block with a centered chart title
pub(crate) fn chart_block(title: &str, theme: Theme) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(theme.title())
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted()))
}

/// Placeholder shown inside a chart when the year has no rows
pub(crate) fn render_no_data(area: Rect, buf: &mut Buffer, year: i32, theme: Theme) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    Paragraph::new(Line::from(Span::styled(
        format!("No data for {}", year),
        Style::default().fg(theme.muted()),
    )))
    .alignment(Alignment::Center)
    .render(Rect { y, height: 1, ..area }, buf);
}
