//! Application core — event loop, key mapping, action dispatch.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use craftwatch_core::{DashboardView, RefreshHandle, RefreshLoop};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, Events};
use crate::screens::dashboard::DashboardScreen;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::status_indicator;

/// Top-level application state and event loop.
pub struct App {
    screen: DashboardScreen,
    running: bool,
    help_visible: bool,
    /// Latest view, kept for the status bar.
    view: Arc<DashboardView>,
    refresh_interval: Duration,
    /// Taken when `run` spawns it.
    refresh_loop: Option<RefreshLoop>,
    handle: RefreshHandle,
    /// Cancels the refresh loop on exit.
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(refresh_loop: RefreshLoop, handle: RefreshHandle, refresh_interval: Duration) -> Self {
        Self {
            screen: DashboardScreen::new(),
            running: true,
            help_visible: false,
            view: handle.current(),
            refresh_interval,
            refresh_loop: Some(refresh_loop),
            handle,
            data_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;

        if let Some(refresh_loop) = self.refresh_loop.take() {
            tokio::spawn(refresh_loop.run(self.data_cancel.clone()));
        }

        // 4 Hz: throbber frames and the countdown need nothing faster.
        let mut events = Events::new(Duration::from_millis(250), self.handle.subscribe());
        self.dispatch(Action::DashboardUpdated(events.current_view()))?;
        tui.draw(|frame| self.render(frame))?;

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };
            if let Some(action) = self.action_for(event) {
                self.dispatch(action)?;
            }
            tui.draw(|frame| self.render(frame))?;
        }

        self.data_cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    fn action_for(&self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) => map_key(key, self.help_visible),
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Frame => Some(Action::Tick),
            Event::View(view) => {
                debug!(cycles = view.cycles, refreshing = view.refreshing, "dashboard view updated");
                Some(Action::DashboardUpdated(view))
            }
        }
    }

    /// Process `action` and any follow-ups the screen returns.
    fn dispatch(&mut self, action: Action) -> Result<()> {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            next = self.process_action(&action)?;
        }
        Ok(())
    }

    fn process_action(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Quit => self.running = false,
            Action::Resize(w, h) => debug!(width = w, height = h, "terminal resized"),
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::RequestRefresh => {
                if self.handle.request_refresh() {
                    debug!("manual refresh requested");
                } else {
                    warn!("refresh loop is not running");
                }
            }
            Action::DashboardUpdated(view) => self.view = Arc::clone(view),
            Action::Tick => {}
        }

        self.screen.update(action)
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [content, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        self.screen.render(frame, content);
        self.render_status_bar(frame, status);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let view = &self.view;
        let mut spans = vec![
            Span::raw(" "),
            status_indicator::status_span(view.status, view.status_label),
            Span::styled(format!(" │ cycle {}", view.cycles), theme::key_hint()),
            Span::styled(
                format!(" │ {}", refresh_hint(view, self.refresh_interval)),
                theme::key_hint(),
            ),
        ];
        if let Some(error) = &view.last_error {
            spans.push(Span::styled(" │ ", theme::key_hint()));
            spans.push(Span::styled(error.clone(), theme::error_text()));
        }
        spans.push(Span::styled(" │ r refresh  ? help  q quit", theme::key_hint()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 46u16.min(area.width.saturating_sub(4));
        let help_height = 11u16.min(area.height.saturating_sub(4));
        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let key = |k: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {k:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };
        let help_text = vec![
            Line::from(""),
            key("r", "Refresh now"),
            key("?", "Toggle this help"),
            key("q Ctrl+c", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "  Refreshes every {}",
                    humantime::format_duration(self.refresh_interval)
                ),
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text).block(block), help_area);
    }
}

/// Map a key to an action. While help is open only the help keys and
/// Ctrl+C are live.
pub fn map_key(key: KeyEvent, help_visible: bool) -> Option<Action> {
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
            _ => None,
        };
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Action::RequestRefresh),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
            Some(Action::ToggleHelp)
        }
        _ => None,
    }
}

/// `"refreshing…"` while a cycle runs, otherwise time until the next
/// scheduled cycle.
fn refresh_hint(view: &DashboardView, interval: Duration) -> String {
    if view.refreshing {
        return "refreshing…".into();
    }
    let Some(last) = view.last_cycle_at else {
        return "waiting for first refresh".into();
    };
    let elapsed = (Local::now() - last).to_std().unwrap_or_default();
    let remaining = interval.saturating_sub(elapsed);
    format!(
        "next in {}",
        humantime::format_duration(Duration::from_secs(remaining.as_secs()))
    )
}
