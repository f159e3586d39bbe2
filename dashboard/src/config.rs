//! Dashboard configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// API root used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://67a6184a510789ef0dfa5f16.mockapi.io";

/// Settings controlling how the dashboard reaches the user API.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Root of the user API; `/users` is appended.
    pub api_base_url: Option<String>,
    /// Optional per-request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl DashboardSettings {
    /// Return the configured base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not a URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Return the configured request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Replace loaded values with explicit overrides where given.
    #[must_use]
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if api_base_url.is_some() {
            self.api_base_url = api_base_url;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }
}
