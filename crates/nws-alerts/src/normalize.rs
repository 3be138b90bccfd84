//! Conversion of NWS GeoJSON alert collections into alert reports.

use chrono::DateTime;
use grid_core::{AlertItem, AlertReport, RegionCode, Severity, SourceError};
use serde::Deserialize;
use serde_json::Value;

/// Top-level GeoJSON feature collection.
#[derive(Debug, Deserialize)]
struct AlertCollection {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
struct AlertFeature {
    #[serde(default)]
    properties: Value,
}

/// The alert properties we care about.
#[derive(Debug, Default, Deserialize)]
struct AlertProperties {
    event: Option<String>,
    severity: Option<String>,
    headline: Option<String>,
    description: Option<String>,
    instruction: Option<String>,
    #[serde(rename = "areaDesc")]
    area_desc: Option<String>,
    effective: Option<String>,
    expires: Option<String>,
}

/// Normalize an NWS active-alerts response body into an [`AlertReport`].
///
/// Keeps the first `max_alerts` alerts in upstream order and headlines the
/// most severe one. An empty collection yields the "no active alerts"
/// sentinel report.
pub fn normalize_alerts(
    code: &RegionCode,
    body: &str,
    max_alerts: usize,
) -> Result<AlertReport, SourceError> {
    let collection: AlertCollection = serde_json::from_str(body)?;

    if collection.features.is_empty() {
        return Ok(AlertReport::no_active_alerts(format!(
            "{} (No active alerts)",
            code
        )));
    }

    let raw: Vec<Value> = collection
        .features
        .into_iter()
        .map(|feature| feature.properties)
        .collect();

    // Malformed property blocks degrade to empty fields rather than failing the report
    let alerts: Vec<AlertProperties> = raw
        .iter()
        .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
        .collect();

    let items = alerts.iter().take(max_alerts).map(to_item).collect();

    let headline = alerts
        .iter()
        .min_by_key(|alert| Severity::from_label(alert.severity.as_deref().unwrap_or("")))
        .unwrap_or(&alerts[0]);

    let region = match non_empty(&headline.area_desc) {
        Some(area) => format!("{} - {}", code, area.split(';').next().unwrap_or(area).trim()),
        None => code.to_string(),
    };

    Ok(AlertReport {
        region,
        headline_event: non_empty(&headline.event)
            .unwrap_or("Alert Active")
            .to_string(),
        headline_description: non_empty(&headline.headline)
            .unwrap_or("Refer to active alerts for details.")
            .to_string(),
        items,
        raw_alerts: Some(raw),
    })
}

fn to_item(alert: &AlertProperties) -> AlertItem {
    AlertItem {
        event: non_empty(&alert.event).unwrap_or("Unknown Event").to_string(),
        severity: non_empty(&alert.severity)
            .unwrap_or("Unknown Severity")
            .to_string(),
        summary: non_empty(&alert.headline)
            .unwrap_or("No headline available.")
            .to_string(),
        window: format!(
            "Effective: {} to {}",
            format_nws_time(alert.effective.as_deref()),
            format_nws_time(alert.expires.as_deref())
        ),
        description: alert.description.clone(),
        instruction: alert.instruction.clone(),
        area: alert.area_desc.clone(),
    }
}

/// Render an NWS ISO-8601 timestamp for display.
///
/// Missing values become `N/A`; unparseable values are returned unchanged.
pub fn format_nws_time(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => "N/A".to_string(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(time) => time.format("%b %-d, %-I:%M %p %:z").to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
