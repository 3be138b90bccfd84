//! HTTP client for the NWS active-alerts endpoint.

use async_trait::async_trait;
use grid_core::{AlertReport, AlertSource, RegionCode, SourceError};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::NwsConfig;
use crate::normalize::normalize_alerts;

/// Alert source backed by the National Weather Service API.
pub struct NwsAlertClient {
    client: Client,
    config: NwsConfig,
}

impl NwsAlertClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NwsConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                SourceError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("NwsAlertClient initialized with API: {}", config.api_url);

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &NwsConfig {
        &self.config
    }
}

#[async_trait]
impl AlertSource for NwsAlertClient {
    async fn fetch_alerts(&self, region: &str) -> Result<AlertReport, SourceError> {
        let code = RegionCode::parse(region)?;
        let url = self.config.alerts_url(code.as_str());

        debug!("Fetching alerts from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/geo+json")
            .send()
            .await
            .map_err(|e| {
                SourceError::Transport(format!("Failed to fetch alerts for {}: {}", code, e))
            })?;

        let status = response.status();

        // NWS answers 404 both for "nothing active" and unknown areas
        if status == StatusCode::NOT_FOUND {
            warn!(
                "NWS returned 404 for {}; assuming no active alerts or invalid area",
                code
            );
            return Ok(AlertReport::no_active_alerts(format!(
                "{} (No active alerts found or invalid area)",
                code
            )));
        }

        let body = response.text().await.map_err(|e| {
            SourceError::Transport(format!("Failed to read alerts for {}: {}", code, e))
        })?;

        if !status.is_success() {
            return Err(SourceError::Transport(format!(
                "NWS request failed for {} ({}): {}",
                code,
                status.as_u16(),
                body.trim()
            )));
        }

        let report = normalize_alerts(&code, &body, self.config.max_alerts)?;
        info!(
            "Fetched {} alerts for {} (headline: {})",
            report.items.len(),
            code,
            report.headline_event
        );

        Ok(report)
    }

    fn name(&self) -> &str {
        "NwsAlertClient"
    }
}
