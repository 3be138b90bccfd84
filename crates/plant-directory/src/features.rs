//! ArcGIS feature-query response parsing.

use grid_core::{FacilityDirectoryResult, FacilityRecord, SourceError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeatureResponse {
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(default)]
    exceeded_transfer_limit: bool,
    error: Option<ArcGisError>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    attributes: PlantAttributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PlantAttributes {
    longitude: Option<f64>,
    latitude: Option<f64>,
    #[serde(rename = "Total_MW")]
    total_mw: Option<f64>,
    #[serde(rename = "Utility_Name")]
    utility_name: Option<String>,
    #[serde(rename = "PrimSource")]
    prim_source: Option<String>,
    state: Option<String>,
}

/// ArcGIS error envelope. The service reports some failures with a 200 status.
#[derive(Debug, Deserialize)]
pub(crate) struct ArcGisError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ArcGisError,
}

impl PlantAttributes {
    fn into_record(self) -> FacilityRecord {
        FacilityRecord {
            utility_name: self.utility_name.unwrap_or_default(),
            primary_source: self.prim_source.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            capacity_mw: self.total_mw,
            longitude: self.longitude.unwrap_or_default(),
            latitude: self.latitude.unwrap_or_default(),
        }
    }
}

/// Parse a feature-query response body.
///
/// A body carrying an ArcGIS `error` object is rejected as a whole; there is
/// no partial result.
pub fn parse_feature_response(body: &str) -> Result<FacilityDirectoryResult, SourceError> {
    let response: FeatureResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(SourceError::Upstream(format!(
            "Plant directory error{}: {}",
            error.code.map(|c| format!(" {}", c)).unwrap_or_default(),
            error.message
        )));
    }

    let facilities = response
        .features
        .into_iter()
        .map(|feature| feature.attributes.into_record())
        .collect();

    Ok(FacilityDirectoryResult::new(
        facilities,
        response.exceeded_transfer_limit,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_features() {
        let body = r#"{
            "objectIdFieldName": "FID",
            "exceededTransferLimit": true,
            "features": [
                {"attributes": {"Longitude": -121.5, "Latitude": 38.6, "Total_MW": 250.0,
                                "Utility_Name": "Riverside Solar Farm", "PrimSource": "Solar", "State": "CA"},
                 "geometry": {"x": -121.5, "y": 38.6}},
                {"attributes": {"Longitude": -97.1, "Latitude": 32.7, "Total_MW": null,
                                "Utility_Name": "Lone Star Gas", "PrimSource": "natural gas", "State": "TX"}}
            ]
        }"#;

        let result = parse_feature_response(body).unwrap();
        assert!(result.truncated);
        assert_eq!(result.len(), 2);
        assert_eq!(result.facilities[0].utility_name, "Riverside Solar Farm");
        assert_eq!(result.facilities[0].capacity_mw, Some(250.0));
        assert_eq!(result.facilities[1].capacity_mw, None);
        assert_eq!(result.facilities[1].state, "TX");
    }

    #[test]
    fn test_missing_features_is_empty() {
        let result = parse_feature_response("{}").unwrap();
        assert!(result.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn test_missing_attributes_default() {
        let body = r#"{"features": [{"attributes": {}}]}"#;
        let result = parse_feature_response(body).unwrap();
        let plant = &result.facilities[0];
        assert_eq!(plant.utility_name, "");
        assert_eq!(plant.longitude, 0.0);
    }

    #[test]
    fn test_error_envelope_rejected() {
        let body = r#"{"error": {"code": 400, "message": "Invalid query parameters"}}"#;
        match parse_feature_response(body) {
            Err(SourceError::Upstream(msg)) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("Invalid query parameters"));
            }
            other => panic!("Expected Upstream error, got {:?}", other),
        }
    }
}
