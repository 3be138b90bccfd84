//! Configuration for the plant directory.

use std::env;

/// Default ArcGIS query endpoint for the power plant layer.
pub const DEFAULT_DIRECTORY_URL: &str = "https://services7.arcgis.com/FGr1D95XCGALKXqM/arcgis/rest/services/Power_Plants_Testing/FeatureServer/0/query?where=1%3D1&outFields=Longitude,Latitude,Total_MW,Utility_Name,PrimSource,State&outSR=4326&f=json";

/// Configuration for [`crate::ArcGisPlantDirectory`].
#[derive(Debug, Clone)]
pub struct PlantDirectoryConfig {
    /// Full query URL, including the `where`, `outFields` and `f=json` parameters.
    pub query_url: String,
}

impl Default for PlantDirectoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTORY_URL)
    }
}

impl PlantDirectoryConfig {
    /// Create a configuration for the given query URL.
    pub fn new(query_url: impl Into<String>) -> Self {
        Self {
            query_url: query_url.into(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PLANT_DIRECTORY_URL` - Query URL (default: the public power plant layer)
    pub fn from_env() -> Self {
        env::var("PLANT_DIRECTORY_URL")
            .map(Self::new)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_requests_needed_fields() {
        let config = PlantDirectoryConfig::default();
        for field in ["Utility_Name", "PrimSource", "Total_MW", "State"] {
            assert!(config.query_url.contains(field));
        }
        assert!(config.query_url.ends_with("f=json"));
    }
}
