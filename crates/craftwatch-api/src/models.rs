// Wire models for the snapshot and history resources.
//
// Both resources are written by an external producer and every field is
// optional. Fields that are absent, null, or of the wrong JSON type fall
// back to their defaults instead of failing the whole document.

use serde::{Deserialize, Serialize};

/// Current point-in-time server status (`data/latest.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    #[serde(rename = "playerCount", default, deserialize_with = "lenient::count")]
    pub player_count: u64,

    /// Raw in-game clock, 1000 ticks per in-game hour.
    #[serde(rename = "serverTime", default, deserialize_with = "lenient::count")]
    pub server_time: u64,

    /// Host computer uptime in seconds.
    #[serde(rename = "computerUptime", default, deserialize_with = "lenient::count")]
    pub computer_uptime: u64,

    #[serde(rename = "computerID", default, deserialize_with = "lenient::label")]
    pub computer_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::names")]
    pub players: Vec<String>,

    /// Unix epoch seconds at which the producer wrote this snapshot.
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub last_updated: Option<i64>,
}

/// Pre-aggregated player-count history (`data/history.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryRecord {
    /// `None` when the producer omitted the list or wrote `null`. Entries
    /// that are not objects are dropped.
    #[serde(default, deserialize_with = "lenient::entries")]
    pub updates: Option<Vec<HistoryEntry>>,
}

impl HistoryRecord {
    /// Updates in producer order; empty when absent.
    pub fn updates(&self) -> &[HistoryEntry] {
        self.updates.as_deref().unwrap_or_default()
    }
}

/// One observation in the history series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "lenient::epoch")]
    pub timestamp: i64,

    #[serde(default, deserialize_with = "lenient::count")]
    pub player_count: u64,

    /// Roster at the time of the observation. Written by the producer,
    /// not used for charting.
    #[serde(default, deserialize_with = "lenient::names")]
    pub players: Vec<String>,
}

/// Field-level fallbacks: decode into a `Value` first, then keep only what
/// has the expected shape.
mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::HistoryEntry;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    fn as_count(value: &Value) -> Option<u64> {
        let Value::Number(n) = value else {
            return None;
        };
        n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn as_epoch(value: &Value) -> Option<i64> {
        let Value::Number(n) = value else {
            return None;
        };
        n.as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
    }

    pub(super) fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        Ok(as_count(&Value::deserialize(d)?).unwrap_or(0))
    }

    pub(super) fn epoch<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(as_epoch(&Value::deserialize(d)?).unwrap_or(0))
    }

    /// Zero is treated as absent, matching producers that write `0` for
    /// "never".
    pub(super) fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(as_epoch(&Value::deserialize(d)?).filter(|ts| *ts != 0))
    }

    /// Strings pass through; numeric identifiers (ComputerCraft computer IDs
    /// are integers) are rendered as text.
    pub(super) fn label<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub(super) fn names<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Unlike the scalar fields, a non-list `updates` fails the document.
    pub(super) fn entries<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Vec<HistoryEntry>>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::Array(items) => Ok(Some(
                items
                    .into_iter()
                    .filter(Value::is_object)
                    .filter_map(|v| serde_json::from_value(v).ok())
                    .collect(),
            )),
            other => Err(D::Error::custom(format!(
                "updates must be an array, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn snapshot_full_document() {
        let snap: Snapshot = serde_json::from_value(json!({
            "playerCount": 2,
            "serverTime": 13500,
            "computerUptime": 3661,
            "computerID": "7",
            "players": ["Alex", "Steve"],
            "last_updated": 1_718_000_000
        }))
        .unwrap();

        assert_eq!(
            snap,
            Snapshot {
                player_count: 2,
                server_time: 13500,
                computer_uptime: 3661,
                computer_id: Some("7".into()),
                players: vec!["Alex".into(), "Steve".into()],
                last_updated: Some(1_718_000_000),
            }
        );
    }

    #[test]
    fn snapshot_empty_object_uses_defaults() {
        let snap: Snapshot = serde_json::from_value(json!({})).unwrap();
        assert_eq!(snap, Snapshot::default());
    }

    #[test]
    fn snapshot_malformed_fields_fall_back() {
        let snap: Snapshot = serde_json::from_value(json!({
            "playerCount": "lots",
            "serverTime": null,
            "computerUptime": -20,
            "computerID": false,
            "players": "Steve",
            "last_updated": "yesterday"
        }))
        .unwrap();
        assert_eq!(snap, Snapshot::default());
    }

    #[test]
    fn snapshot_numeric_quirks() {
        let snap: Snapshot = serde_json::from_value(json!({
            "playerCount": 3.0,
            "computerUptime": 59.9,
            "computerID": 12,
            "players": ["Alex", 4, null, "Steve"],
            "last_updated": 0
        }))
        .unwrap();
        assert_eq!(snap.player_count, 3);
        assert_eq!(snap.computer_uptime, 59);
        assert_eq!(snap.computer_id.as_deref(), Some("12"));
        assert_eq!(snap.players, vec!["Alex".to_owned(), "Steve".to_owned()]);
        assert_eq!(snap.last_updated, None);
    }

    #[test]
    fn history_entries_default_missing_counts() {
        let history: HistoryRecord = serde_json::from_value(json!({
            "updates": [
                { "timestamp": 1_718_000_000, "player_count": 4, "players": ["a"] },
                { "timestamp": 1_718_000_600 }
            ]
        }))
        .unwrap();
        let updates = history.updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].player_count, 4);
        assert_eq!(updates[1].player_count, 0);
        assert_eq!(updates[1].timestamp, 1_718_000_600);
    }

    #[test]
    fn history_without_updates_is_empty() {
        let absent: HistoryRecord = serde_json::from_value(json!({})).unwrap();
        let null: HistoryRecord = serde_json::from_value(json!({ "updates": null })).unwrap();
        assert!(absent.updates().is_empty());
        assert!(null.updates().is_empty());
    }

    #[test]
    fn history_updates_must_be_a_list() {
        let result = serde_json::from_value::<HistoryRecord>(json!({ "updates": 5 }));
        assert!(result.is_err());
    }

    #[test]
    fn history_skips_entries_that_are_not_objects() {
        let history: HistoryRecord = serde_json::from_value(json!({
            "updates": [
                { "timestamp": 1_718_000_000, "player_count": 2 },
                5,
                null,
                "noon",
                { "timestamp": 1_718_000_600, "player_count": "many" }
            ]
        }))
        .unwrap();
        let updates = history.updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].player_count, 2);
        assert_eq!(updates[1].timestamp, 1_718_000_600);
        assert_eq!(updates[1].player_count, 0);
    }
}
