//! Application state and event loop

use std::cell::Cell;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};
use tracing::{debug, info, warn};

use crate::services::{Aggregator, DataLoaderService, DataSource};
use crate::types::{CacheWarning, Dataset, YearSummary};

use super::theme::Theme;
use super::widgets::{
    airline_bubbles::AirlineBubbles,
    delay_trend::DelayTrend,
    distance_share::DistanceShare,
    header::{YearHeader, YearInput},
    help::HelpPopup,
    hierarchy::{self, HierarchyTree},
    loading::{self, LoadingScreen, LoadingStage},
    state_bars::{self, StateBars},
    tabs::{Tab, TabBar},
};

/// Maximum content width (keeps layout clean on wide terminals)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Application state
pub enum AppState {
    /// Loader thread running; `frame` drives the animation
    Loading { frame: usize, stage: LoadingStage },
    /// Ready with loaded data
    Ready { data: Box<AppData> },
    /// Error state
    Error { message: String },
}

/// Loaded dataset plus the summary for the applied year
pub struct AppData {
    pub dataset: Dataset,
    pub source: DataSource,
    pub skipped_rows: usize,
    pub cache_warning: Option<CacheWarning>,
    pub summary: YearSummary,
}

impl AppData {
    /// Hint pointing at the covered years when the applied year has no rows
    fn year_hint(&self) -> Option<String> {
        let year = self.summary.year;
        if self.dataset.contains_year(year) {
            return None;
        }
        let years = self.dataset.years();
        match (years.first(), years.last()) {
            (Some(first), Some(last)) => Some(format!(
                "No records for {} · data covers {}-{}",
                year, first.year, last.year
            )),
            _ => None,
        }
    }

    /// Warning line for the header (absent year, cache problems, dropped rows)
    fn notice(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(hint) = self.year_hint() {
            parts.push(hint);
        }
        if let Some(warning) = &self.cache_warning {
            parts.push(warning.message().to_string());
        }
        if self.skipped_rows > 0 {
            parts.push(format!("{} malformed rows skipped", self.skipped_rows));
        }
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

/// Messages from the loader thread
enum LoadEvent {
    Stage(LoadingStage),
    Done(Result<Box<AppData>, String>),
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    current_tab: Tab,
    /// Year the summary was computed for
    year: i32,
    year_input: YearInput,
    states_scroll: usize,
    hierarchy_scroll: usize,
    show_help: bool,
    theme: Theme,
    /// Shown on the loading screen
    loading_source: String,
    /// Chart area from the last draw, used to bound scrolling
    chart_area: Cell<Rect>,
}

impl App {
    /// Create a new app in loading state
    pub fn new(year: i32, theme: Theme) -> Self {
        Self {
            state: AppState::Loading {
                frame: 0,
                stage: LoadingStage::Reading,
            },
            should_quit: false,
            current_tab: Tab::default(),
            year,
            year_input: YearInput::new(year),
            states_scroll: 0,
            hierarchy_scroll: 0,
            show_help: false,
            theme,
            loading_source: String::new(),
            chart_area: Cell::new(Rect::default()),
        }
    }

    /// Describe where the data comes from while it loads
    pub fn with_loading_source(mut self, source: String) -> Self {
        self.loading_source = source;
        self
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.year_input.is_editing() {
            self.handle_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.current_tab = self.current_tab.next();
            }
            KeyCode::BackTab => {
                self.current_tab = self.current_tab.prev();
            }
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.current_tab = tab;
                }
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            KeyCode::Char('y') | KeyCode::Char('/') => {
                self.year_input.start_editing();
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
                self.step_year(true);
            }
            KeyCode::Char('-') | KeyCode::Char('[') => {
                self.step_year(false);
            }
            KeyCode::Left | KeyCode::Char('h') if self.current_tab == Tab::States => {
                self.states_scroll = self.states_scroll.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') if self.current_tab == Tab::States => {
                self.states_scroll = (self.states_scroll + 1).min(self.max_states_scroll());
            }
            KeyCode::Up | KeyCode::Char('k') if self.current_tab == Tab::Hierarchy => {
                self.hierarchy_scroll = self.hierarchy_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') if self.current_tab == Tab::Hierarchy => {
                self.hierarchy_scroll =
                    (self.hierarchy_scroll + 1).min(self.max_hierarchy_scroll());
            }
            _ => {}
        }
    }

    /// Keys while the year field is focused
    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Some(year) = self.year_input.submit() {
                    self.apply_year(year);
                }
            }
            KeyCode::Esc => self.year_input.cancel(self.year),
            KeyCode::Backspace => self.year_input.backspace(),
            KeyCode::Char(c) => self.year_input.push(c),
            _ => {}
        }
    }

    /// Recompute the summary for `year`
    fn apply_year(&mut self, year: i32) {
        self.year = year;
        self.year_input.set_year(year);
        self.states_scroll = 0;
        self.hierarchy_scroll = 0;

        if let AppState::Ready { data } = &mut self.state {
            data.summary = Aggregator::summarize(data.dataset.records(), year);
            if data.dataset.contains_year(year) {
                debug!(year, records = data.summary.record_count, "applied year");
            } else {
                debug!(year, "applied year has no records");
            }
        }
    }

    /// Move to the next (or previous) year present in the dataset
    fn step_year(&mut self, forward: bool) {
        let AppState::Ready { data } = &self.state else {
            return;
        };
        let years = data.dataset.years();
        let target = if forward {
            years.iter().map(|y| y.year).find(|y| *y > self.year)
        } else {
            years.iter().rev().map(|y| y.year).find(|y| *y < self.year)
        };
        if let Some(year) = target {
            self.apply_year(year);
        }
    }

    fn max_states_scroll(&self) -> usize {
        match &self.state {
            AppState::Ready { data } => state_bars::max_scroll(
                data.summary.dest_states.len(),
                self.chart_area.get().width.saturating_sub(2),
            ),
            _ => 0,
        }
    }

    fn max_hierarchy_scroll(&self) -> usize {
        match &self.state {
            AppState::Ready { data } => hierarchy::max_scroll(
                &data.summary,
                self.chart_area.get().height.saturating_sub(2),
            ),
            _ => 0,
        }
    }

    /// Apply a message from the loader thread
    fn apply_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Stage(stage) => {
                if let AppState::Loading { frame, .. } = self.state {
                    self.state = AppState::Loading { frame, stage };
                }
            }
            LoadEvent::Done(Ok(data)) => self.state = AppState::Ready { data },
            LoadEvent::Done(Err(message)) => self.state = AppState::Error { message },
        }
    }

    /// Advance the loading animation
    pub fn tick(&mut self) {
        if let AppState::Loading { frame, stage } = self.state {
            self.state = AppState::Loading {
                frame: loading::next_frame(frame),
                stage,
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn render_ready(&self, data: &AppData, area: Rect, buf: &mut Buffer) {
        // Apply max width constraint and center the content
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(YearHeader::HEIGHT), // Title + year input
            Constraint::Length(1),                  // Tabs
            Constraint::Length(1),                  // Separator
            Constraint::Fill(1),                    // Chart
            Constraint::Length(1),                  // Keybindings
        ])
        .split(centered_area);

        let source = data.source.to_string();
        let notice = data.notice();
        YearHeader::new(
            &self.year_input,
            data.summary.record_count,
            &source,
            self.theme,
        )
        .with_notice(notice.as_deref())
        .render(chunks[0], buf);

        TabBar::new(self.current_tab, self.theme).render(chunks[1], buf);
        buf.set_string(
            chunks[2].x,
            chunks[2].y,
            "─".repeat(chunks[2].width as usize),
            Style::default().fg(self.theme.muted()),
        );

        let chart = chunks[3];
        self.chart_area.set(chart);
        let summary = &data.summary;
        match self.current_tab {
            Tab::DelayTrend => DelayTrend::new(summary, self.theme).render(chart, buf),
            Tab::Distance => DistanceShare::new(summary, self.theme).render(chart, buf),
            Tab::States => StateBars::new(summary, self.theme)
                .with_scroll(self.states_scroll)
                .render(chart, buf),
            Tab::Airlines => AirlineBubbles::new(summary, self.theme).render(chart, buf),
            Tab::Hierarchy => HierarchyTree::new(summary, self.theme)
                .with_scroll(self.hierarchy_scroll)
                .render(chart, buf),
        }

        self.render_keybindings(chunks[4], buf);

        // Render help popup overlay if active
        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(self.theme.accent());
        let desc = Style::default().fg(self.theme.muted());

        let mut spans = vec![
            Span::styled("Tab", key),
            Span::styled(": Chart", desc),
            Span::raw("  "),
            Span::styled("y", key),
            Span::styled(": Year", desc),
            Span::raw("  "),
            Span::styled("[ ]", key),
            Span::styled(": Step", desc),
            Span::raw("  "),
        ];
        match self.current_tab {
            Tab::States => {
                spans.push(Span::styled("←→", key));
                spans.push(Span::styled(": Scroll", desc));
                spans.push(Span::raw("  "));
            }
            Tab::Hierarchy => {
                spans.push(Span::styled("↑↓", key));
                spans.push(Span::styled(": Scroll", desc));
                spans.push(Span::raw("  "));
            }
            _ => {}
        }
        spans.extend([
            Span::styled("?", key),
            Span::styled(": Help", desc),
            Span::raw("  "),
            Span::styled("q", key),
            Span::styled(": Quit", desc),
        ]);

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading { frame, stage } => {
                LoadingScreen::new(*frame, *stage, &self.loading_source, self.theme)
                    .render(area, buf);
            }
            AppState::Ready { data } => self.render_ready(data, area, buf),
            AppState::Error { message } => {
                let y = area.y + area.height / 2;
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        format!("Error: {}", message),
                        Style::default()
                            .fg(self.theme.error())
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        "Press q to quit",
                        Style::default().fg(self.theme.muted()),
                    )),
                ])
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        y,
                        height: area.height.saturating_sub(y - area.y),
                        ..area
                    },
                    buf,
                );
            }
        }
    }
}

/// Run the TUI application
pub fn run(loader: DataLoaderService, initial_year: i32) -> anyhow::Result<()> {
    // Detect theme BEFORE entering raw mode (terminal-light needs normal mode)
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, loader, initial_year, theme);
    ratatui::restore();
    result
}

/// Load and aggregate (runs on the background thread)
fn load_data_sync(
    loader: &DataLoaderService,
    year: i32,
    progress: &Sender<LoadEvent>,
) -> Result<Box<AppData>, String> {
    let loaded = loader.load().map_err(|e| {
        warn!("failed to load dataset: {}", e);
        e.to_string()
    })?;

    let _ = progress.send(LoadEvent::Stage(LoadingStage::Aggregating));
    let summary = Aggregator::summarize(loaded.dataset.records(), year);
    info!(
        records = loaded.dataset.len(),
        source = %loaded.source,
        year,
        "dataset ready"
    );

    Ok(Box::new(AppData {
        dataset: loaded.dataset,
        source: loaded.source,
        skipped_rows: loaded.skipped_rows,
        cache_warning: loaded.cache_warning,
        summary,
    }))
}

fn run_app(
    terminal: &mut DefaultTerminal,
    loader: DataLoaderService,
    initial_year: i32,
    theme: Theme,
) -> anyhow::Result<()> {
    let mut app = App::new(initial_year, theme).with_loading_source(loader.describe());

    // Spawn background thread for data loading
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = load_data_sync(&loader, initial_year, &tx);
        let _ = tx.send(LoadEvent::Done(result));
    });

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Drain loader messages (non-blocking)
        if matches!(app.state, AppState::Loading { .. }) {
            while let Ok(event) = rx.try_recv() {
                app.apply_load_event(event);
            }
        }

        // Poll for events with 100ms timeout for the loading animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
