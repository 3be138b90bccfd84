//! Configuration for the NWS client.

use std::env;

/// Default NWS API base URL.
pub const DEFAULT_API_URL: &str = "https://api.weather.gov";

/// Default User-Agent. NWS asks callers to identify themselves.
pub const DEFAULT_USER_AGENT: &str = "Stormwatch/0.1 (contact@example.com)";

/// Default number of alerts kept in a report.
pub const DEFAULT_MAX_ALERTS: usize = 7;

/// Configuration for [`crate::NwsAlertClient`].
#[derive(Debug, Clone)]
pub struct NwsConfig {
    /// API base URL.
    pub api_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Maximum number of alerts listed in a report.
    pub max_alerts: usize,
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_alerts: DEFAULT_MAX_ALERTS,
        }
    }
}

impl NwsConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `NWS_API_URL` - API URL (default: https://api.weather.gov)
    /// - `NWS_USER_AGENT` - User-Agent header
    /// - `NWS_MAX_ALERTS` - Alerts kept per report (default: 7)
    pub fn from_env() -> Self {
        let api_url = env::var("NWS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let user_agent =
            env::var("NWS_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let max_alerts = env::var("NWS_MAX_ALERTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ALERTS);

        Self {
            api_url,
            user_agent,
            max_alerts,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> NwsConfigBuilder {
        NwsConfigBuilder::default()
    }

    /// Active-alerts endpoint for an area code.
    pub fn alerts_url(&self, area: &str) -> String {
        format!(
            "{}/alerts/active/area/{}",
            self.api_url.trim_end_matches('/'),
            area
        )
    }
}

/// Builder for NwsConfig.
#[derive(Debug, Default)]
pub struct NwsConfigBuilder {
    config: NwsConfig,
}

impl NwsConfigBuilder {
    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the User-Agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the maximum number of alerts per report.
    pub fn max_alerts(mut self, max: usize) -> Self {
        self.config.max_alerts = max;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> NwsConfig {
        self.config
    }
}
