//! Stats renderer: snapshot fields to display strings.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use craftwatch_api::Snapshot;

/// Raw server clock units per in-game hour.
pub const TICKS_PER_HOUR: u64 = 1000;

/// Raw server clock units per in-game minute. Non-integral: the last few
/// ticks of each hour render as minute `60`.
pub const TICKS_PER_MINUTE: f64 = 16.6;

/// Shown when the snapshot carries no computer identifier.
pub const UNKNOWN_IDENTIFIER: &str = "Unknown";

/// Formatted stat values for the four stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsDisplay {
    pub player_count: String,
    pub server_time: String,
    pub uptime: String,
    pub computer_id: String,
}

/// Map a snapshot to its display strings. Absent fields have already been
/// defaulted during decoding, so this never fails.
pub fn render_stats(snapshot: &Snapshot) -> StatsDisplay {
    StatsDisplay {
        player_count: snapshot.player_count.to_string(),
        server_time: format_server_time(snapshot.server_time),
        uptime: format_uptime(snapshot.computer_uptime),
        computer_id: snapshot
            .computer_id
            .clone()
            .unwrap_or_else(|| UNKNOWN_IDENTIFIER.to_owned()),
    }
}

/// `H:MM` from the raw in-game clock.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn format_server_time(raw: u64) -> String {
    let hours = raw / TICKS_PER_HOUR;
    let minutes = ((raw % TICKS_PER_HOUR) as f64 / TICKS_PER_MINUTE).floor() as u64;
    format!("{hours}:{minutes:02}")
}

/// `"<H>h <M>m"`, unpadded, from uptime seconds.
pub fn format_uptime(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    format!("{hours}h {minutes}m")
}

/// Local date and time for the "last updated" line. `None` when the
/// timestamp is outside chrono's representable range.
pub fn format_last_updated(epoch_secs: i64) -> Option<String> {
    format_last_updated_in(epoch_secs, &Local)
}

pub fn format_last_updated_in<Tz: TimeZone>(epoch_secs: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|utc| utc.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn server_time_first_hour() {
        for raw in [0, 1, 16, 500, 995, 999] {
            assert!(
                format_server_time(raw).starts_with("0:"),
                "raw {raw} rendered {}",
                format_server_time(raw)
            );
        }
        assert_eq!(format_server_time(0), "0:00");
        assert_eq!(format_server_time(17), "0:01");
        assert_eq!(format_server_time(500), "0:30");
    }

    #[test]
    fn server_time_hour_rollover() {
        assert_eq!(format_server_time(1000), "1:00");
        assert_eq!(format_server_time(13_500), "13:30");
        assert_eq!(format_server_time(24_000), "24:00");
    }

    #[test]
    fn server_time_keeps_literal_divisor() {
        // The approximation overflows the minute near the end of each hour.
        assert_eq!(format_server_time(998), "0:60");
        assert_eq!(format_server_time(1999), "1:60");
        assert_eq!(format_server_time(995), "0:59");
    }

    #[test]
    fn uptime_hours_and_minutes() {
        assert_eq!(format_uptime(0), "0h 0m");
        assert_eq!(format_uptime(59), "0h 0m");
        assert_eq!(format_uptime(3661), "1h 1m");
        assert_eq!(format_uptime(90_000), "25h 0m");
    }

    #[test]
    fn render_defaults() {
        let stats = render_stats(&Snapshot::default());
        assert_eq!(
            stats,
            StatsDisplay {
                player_count: "0".into(),
                server_time: "0:00".into(),
                uptime: "0h 0m".into(),
                computer_id: "Unknown".into(),
            }
        );
    }

    #[test]
    fn render_populated_snapshot() {
        let snapshot = Snapshot {
            player_count: 4,
            server_time: 6000,
            computer_uptime: 7320,
            computer_id: Some("42".into()),
            ..Snapshot::default()
        };
        let stats = render_stats(&snapshot);
        assert_eq!(stats.player_count, "4");
        assert_eq!(stats.server_time, "6:00");
        assert_eq!(stats.uptime, "2h 2m");
        assert_eq!(stats.computer_id, "42");
    }

    #[test]
    fn last_updated_in_utc() {
        assert_eq!(
            format_last_updated_in(1_718_000_000, &Utc).as_deref(),
            Some("2024-06-10 06:13:20")
        );
        assert_eq!(format_last_updated_in(i64::MAX, &Utc), None);
    }
}
