//! Terminal UI for the request-log dashboard
//!
//! Owns the fetch state machine and the grouped series derived from it, and
//! renders one chart panel per request name using ratatui.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::DashboardConfig;
use crate::dashboard::chart::render_panel;
use crate::logs::{group_by_request_name, FetchState, GroupedSeries};

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    Refresh,
    Quit,
}

/// Application state for the log dashboard
pub struct DashboardApp {
    pub state: FetchState,
    pub series: GroupedSeries,
    /// Index of the first visible panel
    pub scroll: usize,
    pub last_update: Option<DateTime<Local>>,
    pub endpoint: String,
    date_format: String,
    panel_height: u16,
}

impl DashboardApp {
    pub fn new(cfg: &DashboardConfig, endpoint: impl Into<String>) -> Self {
        Self {
            state: FetchState::Idle,
            series: GroupedSeries::new(),
            scroll: 0,
            last_update: None,
            endpoint: endpoint.into(),
            date_format: cfg.date_format.clone(),
            panel_height: cfg.panel_height,
        }
    }

    /// Enter `Loading`; the previous series stays until a result arrives
    pub fn begin_loading(&mut self) {
        self.state.transition(FetchState::Loading);
    }

    /// Apply a settled fetch result, rebuilding the grouped series
    pub fn apply(&mut self, next: FetchState) {
        self.series = match &next {
            FetchState::Success(outcome) => {
                group_by_request_name(&outcome.records, &self.date_format)
            }
            _ => GroupedSeries::new(),
        };
        self.scroll = 0;
        self.last_update = Some(Local::now());
        self.state.transition(next);
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> DashboardAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return DashboardAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if !self.state.is_loading() {
                    return DashboardAction::Refresh;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.series.len().saturating_sub(1),
            _ => {}
        }
        DashboardAction::None
    }

    fn scroll_down(&mut self) {
        if self.scroll + 1 < self.series.len() {
            self.scroll += 1;
        }
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(5),    // Panels
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_body(f, chunks[1]);
        self.render_footer(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let last_update = self
            .last_update
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let title = vec![
            Line::from(vec![
                Span::styled(
                    "Request Performance Analysis",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  |  Last update: "),
                Span::styled(last_update, Style::default().fg(Color::Green)),
            ]),
            Line::from(vec![
                Span::styled(self.endpoint.clone(), Style::default().fg(Color::DarkGray)),
                self.counts_span(),
            ]),
        ];

        let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Record and group counts for the header; empty until data arrives
    fn counts_span(&self) -> Span<'static> {
        match &self.state {
            FetchState::Success(outcome) => Span::styled(
                format!(
                    "  |  {} records, {} groups",
                    outcome.records.len(),
                    self.series.len()
                ),
                Style::default().fg(Color::Yellow),
            ),
            _ => Span::raw(""),
        }
    }

    fn render_body(&self, f: &mut Frame, area: Rect) {
        match &self.state {
            FetchState::Idle | FetchState::Loading => {
                render_message(f, area, "Loading data...", Style::default().fg(Color::Gray));
            }
            FetchState::Error(reason) => {
                render_message(
                    f,
                    area,
                    &format!("Error: {}", reason),
                    Style::default().fg(Color::Red),
                );
            }
            FetchState::Success(_) if self.series.is_empty() => {
                render_message(f, area, "No data to display", Style::default().fg(Color::Gray));
            }
            FetchState::Success(_) => self.render_panels(f, area),
        }
    }

    fn render_panels(&self, f: &mut Frame, area: Rect) {
        let area = if self.state.is_sample_data() {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(area);
            let notice = Paragraph::new("Warning: using sample data")
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::Rgb(0xf5, 0x7c, 0x00))
                        .add_modifier(Modifier::BOLD),
                );
            f.render_widget(notice, rows[0]);
            rows[1]
        } else {
            area
        };

        let visible = self.visible_panels(area.height);
        let groups = self.series.groups();
        let shown = &groups[self.scroll.min(groups.len())..];
        let shown = &shown[..visible.min(shown.len())];

        let mut constraints: Vec<Constraint> = shown
            .iter()
            .map(|_| Constraint::Length(self.panel_height))
            .collect();
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (group, row) in shown.iter().zip(rows.iter()) {
            render_panel(f, *row, group);
        }
    }

    /// Panels that fit in `height` rows; always at least one
    fn visible_panels(&self, height: u16) -> usize {
        ((height / self.panel_height.max(1)) as usize).max(1)
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let summary = match &self.state {
            FetchState::Success(_) if !self.series.is_empty() => {
                let first = self.scroll + 1;
                let last = (self.scroll + self.visible_panels(self.body_height(f.area().height)))
                    .min(self.series.len());
                Span::raw(format!("Groups {}-{} of {}", first, last, self.series.len()))
            }
            other => Span::styled(
                format!("State: {}", other.name()),
                Style::default().fg(Color::Yellow),
            ),
        };

        let content = vec![Line::from(vec![
            summary,
            Span::styled(
                "  |  'q' quit  'r' refresh  ↑/↓ scroll",
                Style::default().fg(Color::DarkGray),
            ),
        ])];

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Rows left for panels once header, footer and the sample notice are taken
    fn body_height(&self, total: u16) -> u16 {
        let notice = if self.state.is_sample_data() { 1 } else { 0 };
        total.saturating_sub(4 + 3 + notice)
    }
}

fn render_message(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::{FetchOutcome, LogRecord};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> DashboardApp {
        DashboardApp::new(&DashboardConfig::default(), "http://localhost/GetLogs")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(app: &DashboardApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 44)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_dashboard_app_creation() {
        let app = app();
        assert_eq!(app.state, FetchState::Idle);
        assert!(app.series.is_empty());
        assert!(app.last_update.is_none());
    }

    #[test]
    fn test_loading_view() {
        let mut app = app();
        app.begin_loading();
        assert!(screen(&app).contains("Loading data..."));
    }

    #[test]
    fn test_error_view() {
        let mut app = app();
        app.begin_loading();
        app.apply(FetchState::Error("Network response was not ok".to_string()));

        let text = screen(&app);
        assert!(text.contains("Error: Network response was not ok"));
        assert!(app.series.is_empty());
    }

    #[test]
    fn test_empty_success_shows_no_data() {
        let mut app = app();
        app.apply(FetchState::Success(FetchOutcome::remote(Vec::new())));

        let text = screen(&app);
        assert!(text.contains("No data to display"));
        assert!(!text.contains("Error"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn test_sample_data_renders_panels_and_notice() {
        let mut app = app();
        app.apply(FetchState::Success(FetchOutcome::sample()));

        assert_eq!(app.series.len(), 3);
        let text = screen(&app);
        assert!(text.contains("Warning: using sample data"));
        assert!(text.contains("GetBalance"));
        assert!(text.contains("Execution time (ms)"));
        assert!(text.contains("Status code"));
    }

    #[test]
    fn test_remote_data_has_no_sample_notice() {
        let mut app = app();
        let records = vec![
            LogRecord::new("2024-03-01T10:00:00", "GetBalance", 150.0, 200, ""),
            LogRecord::new("2024-03-01T10:10:00", "GetBalance", 120.0, 500, ""),
        ];
        app.apply(FetchState::Success(FetchOutcome::remote(records)));

        let text = screen(&app);
        assert!(!text.contains("sample data"));
        assert!(text.contains("GetBalance"));
        assert!(text.contains("2 points"));
    }

    #[test]
    fn test_header_shows_record_and_group_counts() {
        let mut app = app();
        app.apply(FetchState::Success(FetchOutcome::sample()));

        let text = screen(&app);
        let header: Vec<&str> = text.lines().take(4).collect();
        assert!(header.join("\n").contains("8 records, 3 groups"));
    }

    #[test]
    fn test_header_has_no_counts_while_loading() {
        let mut app = app();
        app.begin_loading();
        assert!(!screen(&app).contains("records,"));
    }

    #[test]
    fn test_scrolling_is_bounded() {
        let mut app = app();
        app.apply(FetchState::Success(FetchOutcome::sample()));

        assert_eq!(app.handle_key(key(KeyCode::Down)), DashboardAction::None);
        assert_eq!(app.scroll, 1);
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.scroll, 2);

        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.scroll, 0);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.scroll, 0);
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.scroll, 2);
    }

    #[test]
    fn test_refresh_ignored_while_loading() {
        let mut app = app();
        app.begin_loading();
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), DashboardAction::None);

        app.apply(FetchState::Success(FetchOutcome::sample()));
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), DashboardAction::Refresh);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), DashboardAction::Quit);
    }
}
