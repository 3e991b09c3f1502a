// Runtime configuration consumed by the refresh loop.
//
// Built by `craftwatch-config` from TOML / environment / CLI layers; this
// type holds only validated values.

use std::time::Duration;

use url::Url;

use craftwatch_api::{Endpoints, StatusClient, TransportConfig};

use crate::error::CoreError;
use crate::roster::AvatarTemplate;

/// Default refresh cadence.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(60_000);

/// Everything needed to run a dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory the JSON resources are published under.
    pub base_url: Url,
    pub endpoints: Endpoints,
    pub refresh_interval: Duration,
    pub avatars: AvatarTemplate,
    pub transport: TransportConfig,
}

impl DashboardConfig {
    /// Defaults for everything except the base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            endpoints: Endpoints::default(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            avatars: AvatarTemplate::default(),
            transport: TransportConfig::default(),
        }
    }

    /// Build the HTTP client for this configuration.
    pub fn build_client(&self) -> Result<StatusClient, CoreError> {
        if self.refresh_interval.is_zero() {
            return Err(CoreError::ZeroInterval);
        }
        Ok(StatusClient::new(
            &self.base_url,
            &self.endpoints,
            &self.transport,
        )?)
    }
}
