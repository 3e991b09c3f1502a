// ── Refresh loop ──
//
// One cycle: fetch snapshot → render stats/roster/status → fetch history →
// update chart. The two fetches are independent: a failing snapshot still
// lets the chart refresh, and a failing history never touches the status.
//
// Cycles never overlap. The loop task exclusively owns the Dashboard and
// awaits each cycle before looking at its triggers again; timer ticks that
// elapse during a slow cycle are skipped, and manual requests that queue up
// during a cycle are discarded once it completes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use craftwatch_api::{FailureKind, StatusClient};

use crate::chart::ChartRefresh;
use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, DashboardView};
use crate::error::CoreError;
use crate::roster::RosterRenderer;

/// What started a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Trigger {
    Startup,
    Timer,
    Manual,
}

/// Result of one cycle, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// `None` when the snapshot was rendered; the failure kind otherwise.
    pub snapshot_failure: Option<FailureKind>,
    pub chart: ChartRefresh,
}

impl CycleReport {
    pub fn online(&self) -> bool {
        self.snapshot_failure.is_none()
    }
}

/// Run one refresh cycle against `dashboard`. Never fails; every error is
/// absorbed into the dashboard state and the returned report.
pub async fn refresh_cycle(dashboard: &mut Dashboard, client: &StatusClient) -> CycleReport {
    let snapshot_failure = match client.fetch_snapshot().await {
        Ok(snapshot) => {
            dashboard.apply_snapshot(&snapshot);
            None
        }
        Err(e) => {
            dashboard.mark_offline(&e);
            Some(e.kind())
        }
    };

    let chart = dashboard.chart_mut().refresh(client).await;
    dashboard.finish_cycle();

    CycleReport {
        snapshot_failure,
        chart,
    }
}

/// Handle held by the host: observe views and request manual refreshes.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    requests: mpsc::UnboundedSender<()>,
    views: watch::Receiver<Arc<DashboardView>>,
}

impl RefreshHandle {
    /// Ask for an immediate cycle. Ignored if a cycle is already running.
    /// Returns `false` once the loop has stopped.
    pub fn request_refresh(&self) -> bool {
        self.requests.send(()).is_ok()
    }

    /// Subscribe to published views. The receiver starts marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardView>> {
        self.views.clone()
    }

    /// Latest published view.
    pub fn current(&self) -> Arc<DashboardView> {
        Arc::clone(&self.views.borrow())
    }
}

/// The single active component: owns the dashboard and drives its cycles.
pub struct RefreshLoop {
    client: StatusClient,
    dashboard: Dashboard,
    period: Duration,
    requests: mpsc::UnboundedReceiver<()>,
    views: watch::Sender<Arc<DashboardView>>,
}

impl RefreshLoop {
    pub fn new(
        client: StatusClient,
        dashboard: Dashboard,
        period: Duration,
    ) -> Result<(Self, RefreshHandle), CoreError> {
        if period.is_zero() {
            return Err(CoreError::ZeroInterval);
        }
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(Arc::new(dashboard.view(false)));
        let handle = RefreshHandle {
            requests: request_tx,
            views: view_rx,
        };
        Ok((
            Self {
                client,
                dashboard,
                period,
                requests: request_rx,
                views: view_tx,
            },
            handle,
        ))
    }

    /// Build client, dashboard and loop from configuration.
    pub fn from_config(config: &DashboardConfig) -> Result<(Self, RefreshHandle), CoreError> {
        let client = config.build_client()?;
        let dashboard = Dashboard::new(RosterRenderer::new(config.avatars.clone()));
        Self::new(client, dashboard, config.refresh_interval)
    }

    /// Run until `cancel` fires: one immediate cycle, then one per period.
    ///
    /// An in-flight cycle is abandoned on cancellation.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(
            snapshot = %self.client.snapshot_url(),
            history = %self.client.history_url(),
            period_ms = self.period.as_millis(),
            "refresh loop started"
        );

        if !self.cycle_or_cancel(Trigger::Startup, &cancel).await {
            return;
        }

        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let trigger = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = interval.tick() => Trigger::Timer,
                Some(()) = self.requests.recv() => Trigger::Manual,
            };

            if !self.cycle_or_cancel(trigger, &cancel).await {
                break;
            }
        }

        debug!(cycles = self.dashboard.cycles(), "refresh loop stopped");
    }

    /// Returns `false` if cancelled mid-cycle.
    async fn cycle_or_cancel(&mut self, trigger: Trigger, cancel: &CancellationToken) -> bool {
        tokio::select! {
            biased;
            () = cancel.cancelled() => false,
            () = self.cycle(trigger) => true,
        }
    }

    async fn cycle(&mut self, trigger: Trigger) {
        debug!(%trigger, "refresh cycle starting");
        self.publish(true);

        let report = refresh_cycle(&mut self.dashboard, &self.client).await;

        let mut discarded = 0_usize;
        while self.requests.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "dropped refresh requests received during cycle");
        }

        debug!(
            %trigger,
            online = report.online(),
            chart = ?report.chart,
            "refresh cycle finished"
        );
        self.publish(false);
    }

    fn publish(&self, refreshing: bool) {
        // Stored even with no live receivers.
        self.views
            .send_replace(Arc::new(self.dashboard.view(refreshing)));
    }
}
