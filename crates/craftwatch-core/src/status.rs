//! Online/offline indicator.

use serde::Serialize;
use strum::{Display, IntoStaticStr};

/// Server reachability as of the last completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
pub enum ServerStatus {
    Online,
    Offline,
}

impl ServerStatus {
    /// Style class for the indicator dot.
    pub fn class(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// Binary status driven solely by the current cycle's snapshot outcome.
/// Undefined until the first cycle completes; no debounce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusIndicator {
    state: Option<ServerStatus>,
}

impl StatusIndicator {
    /// Record this cycle's outcome. Returns the previous state when it
    /// differs from the new one.
    pub fn set(&mut self, online: bool) -> Option<Option<ServerStatus>> {
        let next = if online {
            ServerStatus::Online
        } else {
            ServerStatus::Offline
        };
        let previous = self.state.replace(next);
        (previous != Some(next)).then_some(previous)
    }

    pub fn state(&self) -> Option<ServerStatus> {
        self.state
    }

    /// Text label; `"Connecting"` before the first cycle.
    pub fn label(&self) -> &'static str {
        self.state.map_or("Connecting", <&'static str>::from)
    }

    pub fn class(&self) -> &'static str {
        self.state.map_or("unknown", ServerStatus::class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_until_first_cycle() {
        let indicator = StatusIndicator::default();
        assert_eq!(indicator.state(), None);
        assert_eq!(indicator.label(), "Connecting");
        assert_eq!(indicator.class(), "unknown");
    }

    #[test]
    fn transitions_are_unconditional() {
        let mut indicator = StatusIndicator::default();

        assert_eq!(indicator.set(true), Some(None));
        assert_eq!(indicator.label(), "Online");
        assert_eq!(indicator.class(), "online");

        assert_eq!(indicator.set(false), Some(Some(ServerStatus::Online)));
        assert_eq!(indicator.label(), "Offline");

        assert_eq!(indicator.set(true), Some(Some(ServerStatus::Offline)));
        assert_eq!(indicator.state(), Some(ServerStatus::Online));
    }

    #[test]
    fn repeated_outcome_is_not_a_transition() {
        let mut indicator = StatusIndicator::default();
        indicator.set(false);
        assert_eq!(indicator.set(false), None);
        assert_eq!(indicator.class(), "offline");
    }
}
