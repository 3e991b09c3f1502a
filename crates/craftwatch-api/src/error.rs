use thiserror::Error;

/// Top-level error type for the `craftwatch-api` crate.
///
/// Every fetch failure falls into one of three [`FailureKind`]s: the request
/// never completed, the server answered outside 2xx, or the body was not the
/// expected JSON shape. `craftwatch-core` treats all three identically on
/// the snapshot path and swallows them on the history path.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Network(#[from] reqwest::Error),

    /// The resource answered with a status outside the 2xx range.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Body was not JSON, or not the expected shape.
    #[error("Unexpected body from {url}: {message}")]
    Parse {
        url: String,
        message: String,
        body_preview: String,
    },

    // ── Construction ────────────────────────────────────────────────
    /// Endpoint URL could not be resolved against the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Coarse classification of a fetch failure, used for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum FailureKind {
    Network,
    HttpStatus,
    Parse,
    Setup,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(e) if e.is_decode() => FailureKind::Parse,
            Self::Network(_) => FailureKind::Network,
            Self::HttpStatus { .. } => FailureKind::HttpStatus,
            Self::Parse { .. } => FailureKind::Parse,
            Self::InvalidUrl(_) | Self::Client(_) => FailureKind::Setup,
        }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the resource was reached but answered outside 2xx.
    pub fn is_http_status(&self) -> bool {
        matches!(self, Self::HttpStatus { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kinds_display_in_kebab_case() {
        assert_eq!(FailureKind::HttpStatus.to_string(), "http-status");
        assert_eq!(<&'static str>::from(FailureKind::Network), "network");
        let err = Error::HttpStatus {
            status: 404,
            url: "http://localhost/data/latest.json".into(),
        };
        assert_eq!(err.kind(), FailureKind::HttpStatus);
        assert_eq!(err.status(), Some(404));
    }
}
