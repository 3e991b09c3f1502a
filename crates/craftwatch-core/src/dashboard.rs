//! Owned display state for one dashboard.
//!
//! [`Dashboard`] replaces the page-global bindings of a browser dashboard:
//! it is constructed once, owned by the refresh task, and mutated only from
//! inside a cycle. Consumers never see it directly; they receive immutable
//! [`DashboardView`] copies.

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{info, warn};

use craftwatch_api::{Error as ApiError, Snapshot};

use crate::chart::{ChartController, ChartSeries, ChartStyle};
use crate::roster::{RosterItem, RosterRenderer};
use crate::stats::{StatsDisplay, format_last_updated, render_stats};
use crate::status::{ServerStatus, StatusIndicator};

/// Immutable copy of everything a host needs to draw the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// `None` until the first cycle completes.
    pub status: Option<ServerStatus>,
    pub status_label: &'static str,
    /// `online`, `offline` or `unknown`; styling key for hosts.
    pub status_class: &'static str,
    /// Last successfully rendered stats; `None` before the first success.
    pub stats: Option<StatsDisplay>,
    /// Last successfully rendered roster; `None` before the first success.
    pub roster: Option<Vec<RosterItem>>,
    pub last_updated: Option<String>,
    pub chart: ChartSeries,
    pub chart_style: ChartStyle,
    /// Most recent snapshot failure, cleared on the next success.
    pub last_error: Option<String>,
    /// Completed cycles since startup.
    pub cycles: u64,
    pub last_cycle_at: Option<DateTime<Local>>,
    /// A cycle is currently in flight.
    pub refreshing: bool,
}

impl Default for DashboardView {
    fn default() -> Self {
        Dashboard::new(RosterRenderer::default()).view(false)
    }
}

#[derive(Debug)]
pub struct Dashboard {
    status: StatusIndicator,
    stats: Option<StatsDisplay>,
    roster: Option<Vec<RosterItem>>,
    last_updated: Option<String>,
    chart: ChartController,
    roster_renderer: RosterRenderer,
    last_error: Option<String>,
    cycles: u64,
    last_cycle_at: Option<DateTime<Local>>,
}

impl Dashboard {
    /// Build the dashboard and set up its chart.
    pub fn new(roster_renderer: RosterRenderer) -> Self {
        Self {
            status: StatusIndicator::default(),
            stats: None,
            roster: None,
            last_updated: None,
            chart: ChartController::setup(),
            roster_renderer,
            last_error: None,
            cycles: 0,
            last_cycle_at: None,
        }
    }

    /// Render a successfully fetched snapshot and mark the server online.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        self.stats = Some(render_stats(snapshot));
        self.roster = Some(self.roster_renderer.render(&snapshot.players));
        if let Some(label) = snapshot.last_updated.and_then(format_last_updated) {
            self.last_updated = Some(label);
        }
        self.last_error = None;
        if let Some(previous) = self.status.set(true) {
            info!(?previous, players = snapshot.player_count, "server online");
        }
    }

    /// Record a snapshot failure. Stats, roster and last-updated keep their
    /// previous values.
    pub fn mark_offline(&mut self, error: &ApiError) {
        warn!(error = %error, kind = %error.kind(), "error updating dashboard");
        self.last_error = Some(error.to_string());
        if let Some(previous) = self.status.set(false) {
            info!(?previous, "server offline");
        }
    }

    pub(crate) fn chart_mut(&mut self) -> &mut ChartController {
        &mut self.chart
    }

    pub(crate) fn finish_cycle(&mut self) {
        self.cycles += 1;
        self.last_cycle_at = Some(Local::now());
    }

    pub fn status(&self) -> Option<ServerStatus> {
        self.status.state()
    }

    pub fn stats(&self) -> Option<&StatsDisplay> {
        self.stats.as_ref()
    }

    pub fn roster(&self) -> Option<&[RosterItem]> {
        self.roster.as_deref()
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn chart(&self) -> &ChartController {
        &self.chart
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Copy out the current display state.
    pub fn view(&self, refreshing: bool) -> DashboardView {
        DashboardView {
            status: self.status.state(),
            status_label: self.status.label(),
            status_class: self.status.class(),
            stats: self.stats.clone(),
            roster: self.roster.clone(),
            last_updated: self.last_updated.clone(),
            chart: self.chart.series().clone(),
            chart_style: self.chart.style(),
            last_error: self.last_error.clone(),
            cycles: self.cycles,
            last_cycle_at: self.last_cycle_at,
            refreshing,
        }
    }
}
