//! Configuration for the craftwatch dashboard.
//!
//! Layers, lowest to highest precedence: built-in defaults, the TOML file,
//! `CRAFTWATCH_*` environment variables, then command-line overrides. The
//! merged [`Config`] is validated into a `craftwatch_core::DashboardConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use craftwatch_core::api::{DEFAULT_HISTORY_PATH, DEFAULT_SNAPSHOT_PATH};
use craftwatch_core::roster::DEFAULT_AVATAR_TEMPLATE;
use craftwatch_core::{
    AvatarTemplate, DEFAULT_REFRESH_INTERVAL, DashboardConfig, Endpoints, TlsMode,
    TransportConfig,
};

/// Environment variable prefix, e.g. `CRAFTWATCH_BASE_URL`.
pub const ENV_PREFIX: &str = "CRAFTWATCH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Flat configuration document, as read from TOML and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Directory the JSON resources are published under. Required.
    pub base_url: Option<String>,

    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    #[serde(default = "default_history_path")]
    pub history_path: String,

    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Must contain `{player}`.
    #[serde(default = "default_avatar_url_template")]
    pub avatar_url_template: String,

    /// Per-request timeout. Unset means no timeout.
    pub timeout_secs: Option<u64>,

    /// Extra CA certificate (PEM) to trust for the resource host.
    pub ca_cert: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            snapshot_path: default_snapshot_path(),
            history_path: default_history_path(),
            refresh_interval_ms: default_refresh_interval_ms(),
            avatar_url_template: default_avatar_url_template(),
            timeout_secs: None,
            ca_cert: None,
        }
    }
}

fn default_snapshot_path() -> String {
    DEFAULT_SNAPSHOT_PATH.into()
}
fn default_history_path() -> String {
    DEFAULT_HISTORY_PATH.into()
}
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn default_refresh_interval_ms() -> u64 {
    DEFAULT_REFRESH_INTERVAL.as_millis() as u64
}
fn default_avatar_url_template() -> String {
    DEFAULT_AVATAR_TEMPLATE.into()
}

/// Values supplied on the command line; unset fields leave lower layers
/// alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval_ms: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "craftwatch", "craftwatch").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("craftwatch");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Merge defaults, the config file, environment and CLI overrides.
///
/// An explicit `path` must exist; the default location is optional.
pub fn load_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) if !p.exists() => return Err(ConfigError::MissingFile(p.to_path_buf())),
        Some(p) => p.to_path_buf(),
        None => config_path(),
    };

    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&file))
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract()?;
    Ok(config)
}

/// Load and validate in one step.
pub fn load_dashboard_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<DashboardConfig, ConfigError> {
    load_config(path, overrides)?.into_dashboard_config()
}

/// Render a config as pretty TOML, e.g. for a starter file.
pub fn to_toml(config: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

// ── Validation ──────────────────────────────────────────────────────

impl Config {
    /// Validate into the runtime configuration.
    pub fn into_dashboard_config(self) -> Result<DashboardConfig, ConfigError> {
        let raw = self
            .base_url
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::invalid("base_url", "not set"))?;
        let base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::invalid("base_url", format!("{raw:?}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "base_url",
                format!("unsupported scheme {:?}", base_url.scheme()),
            ));
        }

        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "refresh_interval_ms",
                "must be greater than zero",
            ));
        }

        for (field, value) in [
            ("snapshot_path", &self.snapshot_path),
            ("history_path", &self.history_path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }

        let avatars = AvatarTemplate::new(self.avatar_url_template)
            .map_err(|e| ConfigError::invalid("avatar_url_template", e.to_string()))?;

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::invalid("timeout_secs", "must be greater than zero"));
        }

        let transport = TransportConfig {
            tls: self.ca_cert.map_or(TlsMode::System, TlsMode::CustomCa),
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..TransportConfig::default()
        };

        Ok(DashboardConfig {
            base_url,
            endpoints: Endpoints {
                snapshot: self.snapshot_path,
                history: self.history_path,
            },
            refresh_interval: Duration::from_millis(self.refresh_interval_ms),
            avatars,
            transport,
        })
    }
}
