//! HTTP client for the ArcGIS plant directory.

use async_trait::async_trait;
use grid_core::{FacilityDirectory, FacilityDirectoryResult, SourceError};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::PlantDirectoryConfig;
use crate::features::{parse_feature_response, ErrorEnvelope};

/// Facility directory backed by an ArcGIS feature service.
pub struct ArcGisPlantDirectory {
    client: Client,
    config: PlantDirectoryConfig,
}

impl ArcGisPlantDirectory {
    /// Create a new directory client with the given configuration.
    pub fn new(config: PlantDirectoryConfig) -> Result<Self, SourceError> {
        let client = Client::builder().build().map_err(|e| {
            SourceError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &PlantDirectoryConfig {
        &self.config
    }
}

#[async_trait]
impl FacilityDirectory for ArcGisPlantDirectory {
    async fn fetch_facilities(&self) -> Result<FacilityDirectoryResult, SourceError> {
        debug!("Fetching plant directory from: {}", self.config.query_url);

        let response = self
            .client
            .get(&self.config.query_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Transport(format!("Plant directory request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(format!("Failed to read plant directory: {}", e)))?;

        if !status.is_success() {
            let details = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(SourceError::Transport(format!(
                "Plant directory request failed: {}. Details: {}",
                status.as_u16(),
                details
            )));
        }

        let result = parse_feature_response(&body)?;

        if result.truncated {
            warn!(
                "Plant directory hit its transfer limit; using a sample of {} plants",
                result.len()
            );
        }
        info!("Fetched {} plants", result.len());

        Ok(result)
    }

    fn name(&self) -> &str {
        "ArcGisPlantDirectory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = PlantDirectoryConfig::new("http://127.0.0.1:1/query?f=json");
        let directory = ArcGisPlantDirectory::new(config).unwrap();

        let result = directory.fetch_facilities().await;
        assert!(matches!(result, Err(SourceError::Transport(_))));
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_fetch_live_directory() {
        let directory = ArcGisPlantDirectory::new(PlantDirectoryConfig::default()).unwrap();
        let result = directory.fetch_facilities().await.unwrap();
        assert!(!result.is_empty());
    }
}
