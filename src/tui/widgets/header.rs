//! Dashboard title and the year input field

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::format::{format_number, titles};
use crate::parsers::parse_year;
use crate::tui::theme::Theme;

/// Longest text accepted in the year field
const MAX_INPUT_LEN: usize = 8;

/// Editable year field.
///
/// Text is only parsed on submit; a failed parse keeps the field in editing
/// mode with the error attached and leaves the applied year untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearInput {
    buffer: String,
    editing: bool,
    error: Option<String>,
}

impl YearInput {
    pub fn new(year: i32) -> Self {
        Self {
            buffer: year.to_string(),
            editing: false,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        self.error = None;
    }

    pub fn push(&mut self, c: char) {
        if self.editing && !c.is_control() && self.buffer.chars().count() < MAX_INPUT_LEN {
            self.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.editing {
            self.buffer.pop();
        }
    }

    /// Abandon the edit and show `applied_year` again
    pub fn cancel(&mut self, applied_year: i32) {
        self.editing = false;
        self.error = None;
        self.buffer = applied_year.to_string();
    }

    /// Parse the buffer. Returns the year on success.
    pub fn submit(&mut self) -> Option<i32> {
        match parse_year(&self.buffer) {
            Ok(year) => {
                self.editing = false;
                self.error = None;
                self.buffer = year.to_string();
                Some(year)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Replace the shown year (e.g. after stepping with [ / ])
    pub fn set_year(&mut self, year: i32) {
        self.editing = false;
        self.error = None;
        self.buffer = year.to_string();
    }
}

/// Title + "Input Year" row + status row
pub struct YearHeader<'a> {
    input: &'a YearInput,
    record_count: usize,
    source: &'a str,
    notice: Option<&'a str>,
    theme: Theme,
}

impl<'a> YearHeader<'a> {
    pub fn new(
        input: &'a YearInput,
        record_count: usize,
        source: &'a str,
        theme: Theme,
    ) -> Self {
        Self {
            input,
            record_count,
            source,
            notice: None,
            theme,
        }
    }

    /// Warning shown under the input (absent year, stale cache, skipped rows)
    pub fn with_notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    /// Rows this widget needs
    pub const HEIGHT: u16 = 3;
}

impl Widget for YearHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Input row
            Constraint::Length(1), // Status / error
        ])
        .split(area);

        Paragraph::new(Line::from(Span::styled(
            titles::DASHBOARD,
            Style::default()
                .fg(self.theme.title())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let field_style = if self.input.is_editing() {
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
                .fg(self.theme.label())
                .add_modifier(Modifier::BOLD)
        };
        let cursor = if self.input.is_editing() { "▏" } else { "" };

        let input_line = Line::from(vec![
            Span::styled("Input Year: ", Style::default().fg(self.theme.text())),
            Span::styled(format!("{}{}", self.input.text(), cursor), field_style),
            Span::styled(
                format!(
                    "   {} records · {}",
                    format_number(self.record_count as u64),
                    self.source
                ),
                Style::default().fg(self.theme.muted()),
            ),
        ]);
        Paragraph::new(input_line)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let status = if let Some(error) = self.input.error() {
            Span::styled(error.to_string(), Style::default().fg(self.theme.error()))
        } else if let Some(notice) = self.notice {
            Span::styled(notice.to_string(), Style::default().fg(self.theme.warn()))
        } else if self.input.is_editing() {
            Span::styled(
                "Enter: apply · Esc: cancel",
                Style::default().fg(self.theme.muted()),
            )
        } else {
            Span::raw("")
        };
        Paragraph::new(Line::from(status))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}
