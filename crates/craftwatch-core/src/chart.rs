//! Player-count chart state.
//!
//! [`ChartController`] is set up once and owns the [`ChartSeries`] for the
//! lifetime of the dashboard. Each refresh replaces the whole series from
//! the latest history document; nothing is merged or smoothed across
//! refreshes. A failed or empty refresh leaves the previous series visible.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::{debug, warn};

use craftwatch_api::{FailureKind, HistoryRecord, StatusClient};

/// Legend text of the single series.
pub const SERIES_LABEL: &str = "Players Online";

/// Upper bound on the number of y-axis ticks.
const MAX_Y_TICKS: u64 = 6;

/// Label used when a timestamp cannot be represented.
const INVALID_LABEL: &str = "--:--";

/// Fixed chart presentation contract: one series, y-axis from zero in
/// whole-number steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartStyle {
    pub series_label: &'static str,
    pub begin_at_zero: bool,
    pub integer_ticks: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            series_label: SERIES_LABEL,
            begin_at_zero: true,
            integer_ticks: true,
        }
    }
}

/// Parallel label/value arrays backing the chart.
///
/// Only built from `(label, value)` pairs via [`FromIterator`], so both
/// arrays always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<u64>,
    /// Bumped on every replace; consumers redraw when it changes.
    revision: u64,
}

impl ChartSeries {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Integer y-axis ticks from zero up to at least the series maximum
    /// (and at least 1), using the smallest whole step that keeps the tick
    /// count bounded.
    pub fn y_ticks(&self) -> Vec<u64> {
        let max = self.max_value().max(1);
        let step = max.div_ceil(MAX_Y_TICKS - 1).max(1);
        let top = max.div_ceil(step) * step;
        (0..=top).step_by(usize::try_from(step).unwrap_or(usize::MAX)).collect()
    }
}

impl FromIterator<(String, u64)> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(points: I) -> Self {
        let (labels, values) = points.into_iter().unzip();
        Self {
            labels,
            values,
            revision: 0,
        }
    }
}

/// Outcome of one chart refresh, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRefresh {
    /// Series replaced with this many points.
    Replaced { points: usize },
    /// History had no updates; series untouched.
    EmptyHistory,
    /// History resource answered outside 2xx; series untouched.
    Unavailable { status: u16 },
    /// Fetch or decode failed; series untouched.
    Failed(FailureKind),
}

/// Owns the chart for the lifetime of the dashboard.
#[derive(Debug, Clone)]
pub struct ChartController {
    style: ChartStyle,
    series: ChartSeries,
}

impl ChartController {
    /// Construct the chart once, with no data.
    pub fn setup() -> Self {
        Self {
            style: ChartStyle::default(),
            series: ChartSeries::default(),
        }
    }

    pub fn style(&self) -> ChartStyle {
        self.style
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    /// Fetch history and replace the series. Never fails: every problem is
    /// logged and reported in the returned [`ChartRefresh`].
    pub async fn refresh(&mut self, client: &StatusClient) -> ChartRefresh {
        match client.fetch_history().await {
            Ok(history) => self.apply(&history),
            Err(e) if e.is_http_status() => {
                let status = e.status().unwrap_or_default();
                debug!(status, url = %client.history_url(), "history unavailable, chart unchanged");
                ChartRefresh::Unavailable { status }
            }
            Err(e) => {
                warn!(error = %e, kind = %e.kind(), "error updating chart");
                ChartRefresh::Failed(e.kind())
            }
        }
    }

    /// Replace the series from `history`, labelling points in local time.
    pub fn apply(&mut self, history: &HistoryRecord) -> ChartRefresh {
        self.apply_in(history, &Local)
    }

    pub fn apply_in<Tz: TimeZone>(&mut self, history: &HistoryRecord, tz: &Tz) -> ChartRefresh
    where
        Tz::Offset: std::fmt::Display,
    {
        let updates = history.updates();
        if updates.is_empty() {
            debug!("history has no updates, chart unchanged");
            return ChartRefresh::EmptyHistory;
        }

        let mut next: ChartSeries = updates
            .iter()
            .map(|u| (hour_minute_label(u.timestamp, tz), u.player_count))
            .collect();
        next.revision = self.series.revision + 1;
        self.series = next;
        let count = self.series.len();
        debug!(points = count, revision = self.series.revision, "chart series replaced");
        ChartRefresh::Replaced { points: count }
    }
}

/// Two-digit `HH:MM` for a unix timestamp in `tz`.
pub fn hour_minute_label<Tz: TimeZone>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(epoch_secs, 0).map_or_else(
        || INVALID_LABEL.to_owned(),
        |utc| utc.with_timezone(tz).format("%H:%M").to_string(),
    )
}
