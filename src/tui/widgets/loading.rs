//! Loading screen shown while the dataset is read and summarized

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::format::{titles, truncate};
use crate::tui::theme::Theme;

/// Cells the plane travels before wrapping around
const TRACK_WIDTH: usize = 24;
const PLANE: char = '✈';

/// Title, blank, track, stage, source
const SCREEN_ROWS: u16 = 5;

/// Background loader progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStage {
    /// Reading the CSV from disk, the cache or the network
    Reading,
    /// Computing the tables for the start year
    Aggregating,
}

impl LoadingStage {
    pub fn message(self) -> &'static str {
        match self {
            Self::Reading => "Reading flight data...",
            Self::Aggregating => "Summarizing flights...",
        }
    }
}

/// Animation frame after `frame`
pub fn next_frame(frame: usize) -> usize {
    (frame + 1) % TRACK_WIDTH
}

/// Flown part as a solid line, the rest dotted
pub fn flight_path(frame: usize) -> String {
    let pos = frame % TRACK_WIDTH;
    (0..TRACK_WIDTH)
        .map(|i| match i.cmp(&pos) {
            std::cmp::Ordering::Less => '─',
            std::cmp::Ordering::Equal => PLANE,
            std::cmp::Ordering::Greater => '·',
        })
        .collect()
}

/// Full-screen loading view
pub struct LoadingScreen<'a> {
    frame: usize,
    stage: LoadingStage,
    /// Where the data is being read from (see `DataLoaderService::describe`)
    source: &'a str,
    theme: Theme,
}

impl<'a> LoadingScreen<'a> {
    pub fn new(frame: usize, stage: LoadingStage, source: &'a str, theme: Theme) -> Self {
        Self {
            frame,
            stage,
            source,
            theme,
        }
    }
}

impl Widget for LoadingScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < SCREEN_ROWS || area.width < TRACK_WIDTH as u16 {
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled(
                titles::DASHBOARD,
                Style::default()
                    .fg(self.theme.title())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                flight_path(self.frame),
                Style::default().fg(self.theme.accent()),
            )),
            Line::from(Span::styled(
                self.stage.message(),
                Style::default().fg(self.theme.text()),
            )),
        ];
        if !self.source.is_empty() {
            lines.push(Line::from(Span::styled(
                truncate(self.source, usize::from(area.width.saturating_sub(2))),
                Style::default().fg(self.theme.muted()),
            )));
        }

        let y = area.y + area.height.saturating_sub(SCREEN_ROWS) / 2;
        Paragraph::new(lines).alignment(Alignment::Center).render(
            Rect {
                y,
                height: SCREEN_ROWS,
                ..area
            },
            buf,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::render_lines;

    #[test]
    fn test_flight_path_moves_plane() {
        let start = flight_path(0);
        assert!(start.starts_with(PLANE));
        assert_eq!(start.chars().count(), TRACK_WIDTH);

        let later = flight_path(3);
        assert!(later.starts_with("───✈·"));
    }

    #[test]
    fn test_next_frame_wraps_at_track_end() {
        assert_eq!(next_frame(0), 1);
        assert_eq!(next_frame(TRACK_WIDTH - 1), 0);
        assert_eq!(flight_path(TRACK_WIDTH), flight_path(0));
    }

    #[test]
    fn test_render_shows_stage_and_source() {
        let lines = render_lines(
            LoadingScreen::new(
                0,
                LoadingStage::Reading,
                "file airline_data.csv",
                Theme::Dark,
            ),
            60,
            11,
        );
        let screen = lines.join("\n");

        // Block of five rows centered vertically: (11 - 5) / 2 = 3
        assert!(lines[3].contains(titles::DASHBOARD));
        assert!(lines[5].contains(PLANE));
        assert!(lines[6].contains("Reading flight data..."));
        assert!(lines[7].contains("file airline_data.csv"));
        assert!(!screen.contains("Summarizing"));
    }

    #[test]
    fn test_render_aggregating_stage() {
        let lines = render_lines(
            LoadingScreen::new(4, LoadingStage::Aggregating, "", Theme::Light),
            60,
            5,
        );
        assert!(lines[3].contains("Summarizing flights..."));
        assert!(lines[4].trim().is_empty());
    }

    #[test]
    fn test_render_skips_tiny_area() {
        let lines = render_lines(
            LoadingScreen::new(0, LoadingStage::Reading, "file a.csv", Theme::Dark),
            10,
            3,
        );
        assert!(lines.iter().all(|l| l.trim().is_empty()));
    }
}
