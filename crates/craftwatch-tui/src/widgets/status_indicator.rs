//! Server status indicator — ●/○/◐ with color mapping.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use craftwatch_core::ServerStatus;

use crate::theme;

/// Status dot for the last completed cycle; `None` means no cycle has
/// finished yet.
pub fn status_char(status: Option<ServerStatus>) -> &'static str {
    match status {
        Some(ServerStatus::Online) => "●",
        Some(ServerStatus::Offline) => "○",
        None => "◐",
    }
}

pub fn status_color(status: Option<ServerStatus>) -> ratatui::style::Color {
    match status {
        Some(ServerStatus::Online) => theme::EMERALD,
        Some(ServerStatus::Offline) => theme::REDSTONE,
        None => theme::GOLD,
    }
}

/// Styled `"● Online"` span.
pub fn status_span(status: Option<ServerStatus>, label: &str) -> Span<'static> {
    Span::styled(
        format!("{} {label}", status_char(status)),
        Style::default()
            .fg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dots_follow_status() {
        assert_eq!(status_char(Some(ServerStatus::Online)), "●");
        assert_eq!(status_char(Some(ServerStatus::Offline)), "○");
        assert_eq!(status_char(None), "◐");
    }

    #[test]
    fn span_carries_label_and_color() {
        let span = status_span(Some(ServerStatus::Offline), "Offline");
        assert_eq!(span.content, "○ Offline");
        assert_eq!(span.style.fg, Some(theme::REDSTONE));
    }
}
