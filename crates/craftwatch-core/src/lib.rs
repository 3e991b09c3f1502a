//! Refresh loop and display model for the craftwatch dashboard.
//!
//! This crate holds everything between the HTTP client and a drawing
//! surface:
//!
//! - **[`RefreshLoop`]** — the only active component. Performs one cycle
//!   at startup, then one per interval (plus manual requests via
//!   [`RefreshHandle`]). Cycles never overlap and never fail: a snapshot
//!   failure flips the status to offline and keeps the last rendered
//!   values, a history failure is logged and ignored.
//!
//! - **[`Dashboard`]** — the owned display state, mutated only inside a
//!   cycle and published as immutable [`DashboardView`] copies over a
//!   `tokio::sync::watch` channel.
//!
//! - **Renderers** — [`stats`] (server clock, uptime, identifier
//!   formatting), [`roster`] (player list with avatar URLs), [`status`]
//!   (online/offline indicator) and [`chart`] (player-count series).

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod refresh;
pub mod roster;
pub mod stats;
pub mod status;

// ── Primary re-exports ──────────────────────────────────────────────
pub use chart::{ChartController, ChartRefresh, ChartSeries, ChartStyle};
pub use config::{DEFAULT_REFRESH_INTERVAL, DashboardConfig};
pub use dashboard::{Dashboard, DashboardView};
pub use error::CoreError;
pub use refresh::{CycleReport, RefreshHandle, RefreshLoop, Trigger, refresh_cycle};
pub use roster::{AvatarTemplate, RosterItem, RosterRenderer};
pub use stats::StatsDisplay;
pub use status::{ServerStatus, StatusIndicator};

pub use craftwatch_api as api;
pub use craftwatch_api::{Endpoints, FailureKind, StatusClient, TlsMode, TransportConfig};
