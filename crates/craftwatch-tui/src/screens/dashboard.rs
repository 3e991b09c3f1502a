//! Dashboard screen — status header, stat cards, roster and player chart.
//!
//! Layout:
//! ┌─ craftwatch ───────────────────────────────────────────────────────┐
//! │ ● Online   Last updated: 2024-06-10 08:13:20                ⠋      │
//! └────────────────────────────────────────────────────────────────────┘
//! ┌─ Players ─┐ ┌─ Server Time ─┐ ┌─ Uptime ─┐ ┌─ Computer ID ─┐
//! │     2     │ │     6:00      │ │  1h 1m   │ │      12       │
//! └───────────┘ └───────────────┘ └──────────┘ └───────────────┘
//! ┌─ Online Players ─────┐ ┌─ Players Online ───────────────────────┐
//! │ Steve  mc-heads.net… │ │  Braille line, y from 0, integer ticks │
//! └──────────────────────┘ └────────────────────────────────────────┘

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph,
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use craftwatch_core::{DashboardView, RosterItem};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::status_indicator;

/// Shown in a stat card before the first successful snapshot.
const NO_VALUE: &str = "--";

pub struct DashboardScreen {
    view: Arc<DashboardView>,
    /// Chart points as (index, players), rebuilt when the series revision
    /// changes.
    points: Vec<(f64, f64)>,
    chart_revision: Option<u64>,
    throbber_state: ThrobberState,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            view: Arc::new(DashboardView::default()),
            points: Vec::new(),
            chart_revision: None,
            throbber_state: ThrobberState::default(),
        }
    }

    fn set_view(&mut self, view: Arc<DashboardView>) {
        if self.chart_revision != Some(view.chart.revision()) {
            self.points = chart_points(view.chart.values());
            self.chart_revision = Some(view.chart.revision());
        }
        self.view = view;
    }

    fn busy(&self) -> bool {
        self.view.refreshing || self.view.status.is_none()
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" craftwatch ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [text_area, throbber_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(16)]).areas(inner);

        let mut spans = vec![
            Span::raw(" "),
            status_indicator::status_span(self.view.status, self.view.status_label),
        ];
        if let Some(updated) = &self.view.last_updated {
            spans.push(Span::styled("   Last updated: ", theme::muted()));
            spans.push(Span::styled(
                updated.clone(),
                Style::default().fg(theme::DIM_WHITE),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), text_area);

        if self.busy() {
            let label = if self.view.status.is_none() {
                "connecting"
            } else {
                "refreshing"
            };
            let throbber = Throbber::default()
                .label(label)
                .style(theme::muted())
                .throbber_style(Style::default().fg(theme::AMETHYST));
            frame.render_stateful_widget(
                throbber,
                throbber_area,
                &mut self.throbber_state.clone(),
            );
        }
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect) {
        let stats = self.view.stats.as_ref();
        let cards = [
            ("Players", stats.map(|s| s.player_count.as_str())),
            ("Server Time", stats.map(|s| s.server_time.as_str())),
            ("Uptime", stats.map(|s| s.uptime.as_str())),
            ("Computer ID", stats.map(|s| s.computer_id.as_str())),
        ];

        let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
        for ((title, value), column) in cards.into_iter().zip(columns.iter()) {
            let block = Block::default()
                .title(Span::styled(format!(" {title} "), theme::title_style()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            let value = Paragraph::new(Span::styled(
                value.unwrap_or(NO_VALUE).to_owned(),
                theme::stat_value(),
            ))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(value, *column);
        }
    }

    fn render_roster(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Online Players ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let Some(roster) = self.view.roster.as_deref() else {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new("  Waiting for data…").style(theme::muted()),
                inner,
            );
            return;
        };

        let items: Vec<ListItem> = roster.iter().map(roster_line).map(ListItem::new).collect();
        frame.render_widget(List::new(items).block(block), area);
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let style = self.view.chart_style;
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", style.series_label),
                theme::title_style(),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        if self.points.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new("  No history yet").style(theme::muted()),
                inner,
            );
            return;
        }

        let series = &self.view.chart;
        let y_ticks = series.y_ticks();
        let y_top = y_ticks.last().copied().unwrap_or(1) as f64;
        let x_max = (self.points.len().saturating_sub(1) as f64).max(1.0);

        let dataset = Dataset::default()
            .name(style.series_label)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::CHART_LINE))
            .data(&self.points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(theme::muted())
                    .bounds([0.0, x_max])
                    .labels(axis_labels(series.labels())),
            )
            .y_axis(
                Axis::default()
                    .style(theme::muted())
                    .bounds([0.0, y_top])
                    .labels(y_ticks.iter().map(u64::to_string).collect::<Vec<_>>()),
            );

        frame.render_widget(chart, area);
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DashboardUpdated(view) => self.set_view(Arc::clone(view)),
            Action::Tick if self.busy() => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [header, cards, body] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
        ])
        .areas(area);
        let [roster, chart] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
                .areas(body);

        self.render_header(frame, header);
        self.render_cards(frame, cards);
        self.render_roster(frame, roster);
        self.render_chart(frame, chart);
    }
}

/// One roster row: bold name followed by the avatar link.
fn roster_line(item: &RosterItem) -> Line<'static> {
    match item {
        RosterItem::Placeholder(text) => Line::from(Span::styled(
            format!(" {text}"),
            theme::muted().add_modifier(Modifier::ITALIC),
        )),
        RosterItem::Player { name, avatar_url } => Line::from(vec![
            Span::styled(format!(" {name}"), theme::player_name()),
            Span::raw("  "),
            Span::styled(avatar_url.clone(), theme::muted()),
        ]),
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn chart_points(values: &[u64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v as f64))
        .collect()
}

/// First, middle and last time labels, spread across the x-axis.
fn axis_labels(labels: &[String]) -> Vec<String> {
    match labels {
        [] => Vec::new(),
        [only] => vec![only.clone()],
        [first, last] => vec![first.clone(), last.clone()],
        [first, .., last] => {
            let mid = labels.get((labels.len() - 1) / 2).unwrap_or(first);
            vec![first.clone(), mid.clone(), last.clone()]
        }
    }
}
