//! Every state transition in the TUI is expressed as an Action.

use std::sync::Arc;

use craftwatch_core::DashboardView;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Resize(u16, u16),

    // ── Data ──────────────────────────────────────────────────────
    DashboardUpdated(Arc<DashboardView>),
    RequestRefresh,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,
}
