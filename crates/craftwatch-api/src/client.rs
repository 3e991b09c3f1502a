// HTTP client for the snapshot and history resources
//
// Wraps `reqwest::Client` with endpoint resolution against a base URL and
// a strict success check. Bodies are decoded in two steps (JSON value,
// then model) so that a well-formed document of the wrong shape is a
// parse failure rather than a silently empty record.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{HistoryRecord, Snapshot};
use crate::transport::TransportConfig;

/// Default snapshot path, relative to the base URL.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/latest.json";

/// Default history path, relative to the base URL.
pub const DEFAULT_HISTORY_PATH: &str = "data/history.json";

/// Maximum number of body bytes carried in a parse error.
const BODY_PREVIEW_LEN: usize = 200;

/// Resource paths, resolved against the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub snapshot: String,
    pub history: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            snapshot: DEFAULT_SNAPSHOT_PATH.to_owned(),
            history: DEFAULT_HISTORY_PATH.to_owned(),
        }
    }
}

/// Read-only client for the two status resources.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    snapshot_url: Url,
    history_url: Url,
}

impl StatusClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the directory the resources are published under
    /// (e.g. `https://example.github.io/status/`). A missing trailing slash
    /// is added so relative endpoint paths resolve beneath it.
    pub fn new(
        base_url: &Url,
        endpoints: &Endpoints,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, endpoints)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &Url,
        endpoints: &Endpoints,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            snapshot_url: resolve(base_url, &endpoints.snapshot)?,
            history_url: resolve(base_url, &endpoints.history)?,
        })
    }

    pub fn snapshot_url(&self) -> &Url {
        &self.snapshot_url
    }

    pub fn history_url(&self) -> &Url {
        &self.history_url
    }

    /// Fetch and decode the current snapshot.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, Error> {
        self.get_object(&self.snapshot_url).await
    }

    /// Fetch and decode the history series.
    pub async fn fetch_history(&self) -> Result<HistoryRecord, Error> {
        self.get_object(&self.history_url).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET `url`, require 2xx, and decode a JSON object body into `T`.
    async fn get_object<T: DeserializeOwned>(&self, url: &Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        trace!(bytes = body.len(), "response body received");

        let parse_error = |message: String| Error::Parse {
            url: url.to_string(),
            message,
            body_preview: preview(&body),
        };

        let value: Value = serde_json::from_str(&body).map_err(|e| parse_error(e.to_string()))?;
        if !value.is_object() {
            return Err(parse_error("expected a JSON object".into()));
        }

        serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
    }
}

/// Resolve `path` beneath `base`, treating `base` as a directory.
fn resolve(base: &Url, path: &str) -> Result<Url, Error> {
    if base.path().ends_with('/') {
        return Ok(base.join(path)?);
    }
    let mut dir = base.clone();
    dir.set_path(&format!("{}/", base.path()));
    Ok(dir.join(path)?)
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_LEN).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolve_treats_base_as_directory() {
        let base = Url::parse("https://example.org/status").unwrap();
        let url = resolve(&base, DEFAULT_SNAPSHOT_PATH).unwrap();
        assert_eq!(url.as_str(), "https://example.org/status/data/latest.json");
    }

    #[test]
    fn resolve_keeps_existing_trailing_slash() {
        let base = Url::parse("https://example.org/status/").unwrap();
        let url = resolve(&base, DEFAULT_HISTORY_PATH).unwrap();
        assert_eq!(url.as_str(), "https://example.org/status/data/history.json");
    }

    #[test]
    fn resolve_host_root() {
        let base = Url::parse("http://127.0.0.1:8080").unwrap();
        let url = resolve(&base, "latest.json").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/latest.json");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(500);
        assert_eq!(preview(&body).chars().count(), BODY_PREVIEW_LEN);
    }
}
