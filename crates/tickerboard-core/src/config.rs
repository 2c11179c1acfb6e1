use std::time::Duration;

use crate::provider::ALPHA_VANTAGE_BASE_URL;

/// Explicit configuration for [`MarketDataService`](crate::MarketDataService).
#[derive(Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Provider credential. `None` means every endpoint serves sample data.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Fixed random-walk seed; `None` draws a fresh seed per request.
    pub sample_seed: Option<u64>,
    /// Per-call transport timeout; unset by default.
    pub provider_timeout: Option<Duration>,
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: String::from(ALPHA_VANTAGE_BASE_URL),
            sample_seed: None,
            provider_timeout: None,
        }
    }

    /// Blank keys are treated as absent.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_sample_seed(mut self, seed: Option<u64>) -> Self {
        self.sample_seed = seed;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("sample_seed", &self.sample_seed)
            .field("provider_timeout", &self.provider_timeout)
            .finish()
    }
}
