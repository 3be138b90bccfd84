//! Alert report types.

use serde::{Deserialize, Serialize};

/// Headline event used when a region has no active alerts.
pub const NO_ACTIVE_ALERTS: &str = "No Active Alerts";

/// Headline description paired with [`NO_ACTIVE_ALERTS`].
pub const NO_ACTIVE_ALERTS_DESCRIPTION: &str =
    "No critical weather alerts reported for this area at this time.";

/// Alert severity as reported upstream, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Extreme,
    Severe,
    Moderate,
    Minor,
    Unknown,
}

impl Severity {
    /// Parse a severity label. Anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "extreme" => Severity::Extreme,
            "severe" => Severity::Severe,
            "moderate" => Severity::Moderate,
            "minor" => Severity::Minor,
            _ => Severity::Unknown,
        }
    }
}

/// A single active alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertItem {
    /// Event name (e.g. "Flood Watch").
    pub event: String,
    /// Severity label as reported upstream.
    pub severity: String,
    /// Short description, usually the alert headline.
    pub summary: String,
    /// Human-readable effective/expiry window.
    pub window: String,
    /// Full alert description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Protective-action instruction text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Affected-area description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// Normalized view of the active alerts for one region.
///
/// A report always exists for a successful fetch: when the upstream has no
/// alerts the report carries the [`NO_ACTIVE_ALERTS`] headline instead of
/// being absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertReport {
    /// Region label, e.g. "TX - Harris".
    pub region: String,
    /// Event name of the headline alert.
    pub headline_event: String,
    /// Description of the headline alert.
    pub headline_description: String,
    /// Up to the first few alerts, in upstream order.
    pub items: Vec<AlertItem>,
    /// Unfiltered upstream alert payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_alerts: Option<Vec<serde_json::Value>>,
}

impl AlertReport {
    /// Build the "no active alerts" sentinel report for a region label.
    pub fn no_active_alerts(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            headline_event: NO_ACTIVE_ALERTS.to_string(),
            headline_description: NO_ACTIVE_ALERTS_DESCRIPTION.to_string(),
            items: Vec::new(),
            raw_alerts: None,
        }
    }

    /// Whether this is the sentinel report.
    pub fn is_no_active_alerts(&self) -> bool {
        self.headline_event == NO_ACTIVE_ALERTS
    }

    /// Whether the report lists at least one alert.
    pub fn has_alerts(&self) -> bool {
        !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Extreme < Severity::Severe);
        assert!(Severity::Minor < Severity::Unknown);
        assert_eq!(Severity::from_label("SEVERE"), Severity::Severe);
        assert_eq!(Severity::from_label("whatever"), Severity::Unknown);
    }

    #[test]
    fn test_sentinel_report() {
        let report = AlertReport::no_active_alerts("CA (No active alerts)");
        assert!(report.is_no_active_alerts());
        assert!(!report.has_alerts());
        assert_eq!(report.headline_description, NO_ACTIVE_ALERTS_DESCRIPTION);
        assert_eq!(report.region, "CA (No active alerts)");
    }
}
