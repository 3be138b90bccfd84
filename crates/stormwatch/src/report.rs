//! Plain-text rendering of query outcomes.

use std::fmt;

use orchestrator::{ExtractionResult, FacilityRecord, QueryOutcome};

/// Most alert items listed in the summary.
const MAX_LISTED_ALERTS: usize = 7;

pub const TRUNCATION_NOTICE: &str =
    "Note: the power plant directory returned a partial list; some facilities may be missing.";

/// Terminal report for one outcome.
pub struct Report<'a>(pub &'a QueryOutcome);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        if let Some(fatal) = &outcome.fatal {
            return writeln!(f, "Error: {}", fatal);
        }

        if let Some(report) = &outcome.alerts {
            writeln!(f, "== Alerts: {} ==", report.region)?;
            writeln!(f, "{}", report.headline_event)?;
            writeln!(f, "{}", report.headline_description)?;
            for item in report.items.iter().take(MAX_LISTED_ALERTS) {
                writeln!(f, "  * {} [{}] {}", item.event, item.severity, item.window)?;
            }
            if report.items.len() > MAX_LISTED_ALERTS {
                writeln!(f, "  ... and {} more", report.items.len() - MAX_LISTED_ALERTS)?;
            }
            writeln!(f)?;
        }

        if outcome.facilities_truncated() {
            writeln!(f, "{}\n", TRUNCATION_NOTICE)?;
        }

        if let Some(extraction) = &outcome.extraction {
            write_affected(f, extraction)?;
        }

        if let Some(narrative) = &outcome.narrative {
            writeln!(f, "== Insight ==\n{}\n", narrative.trim())?;
        }

        if !outcome.errors.is_empty() {
            writeln!(f, "{}", outcome.errors.join("\n"))?;
        }

        Ok(())
    }
}

fn write_affected(f: &mut fmt::Formatter<'_>, extraction: &ExtractionResult) -> fmt::Result {
    writeln!(f, "== Affected Power Plants ==")?;
    if extraction.facilities.is_empty() {
        if let Some(text) = &extraction.fallback_text {
            writeln!(f, "{}", text)?;
        }
    }
    for affected in &extraction.facilities {
        writeln!(
            f,
            "  * {} ({}, {}): {}",
            affected.facility.utility_name,
            affected.facility.primary_source,
            capacity(&affected.facility),
            affected.reason
        )?;
    }
    writeln!(f)
}

fn capacity(facility: &FacilityRecord) -> String {
    match facility.capacity_mw {
        Some(mw) => format!("{:.1} MW", mw),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator::{
        AlertReport, ExtractedAffectedFacility, ExtractionResult, FacilityDirectoryResult,
        QueryError, CANONICAL_NO_RISK,
    };

    fn plant(mw: Option<f64>) -> FacilityRecord {
        FacilityRecord {
            utility_name: "Coastal Power".to_string(),
            primary_source: "natural gas".to_string(),
            state: "FL".to_string(),
            capacity_mw: mw,
            longitude: -80.2,
            latitude: 25.8,
        }
    }

    #[test]
    fn test_fatal_only() {
        let err = QueryError::InputValidation("Enter a region code".into());
        let mut outcome = QueryOutcome::failed(1, "", None, &err);
        outcome.narrative = Some("should not appear".into());

        assert_eq!(Report(&outcome).to_string(), "Error: Enter a region code\n");
    }

    #[test]
    fn test_full_report() {
        let mut outcome = QueryOutcome::begin(1, "FL");
        outcome.in_flight = false;
        outcome.alerts = Some(AlertReport::no_active_alerts("FL (No active alerts)"));
        outcome.facilities = Some(FacilityDirectoryResult::new(vec![plant(None)], true));
        outcome.extraction = Some(ExtractionResult {
            facilities: vec![ExtractedAffectedFacility {
                facility: plant(Some(512.0)),
                reason: "Storm surge".to_string(),
            }],
            ..ExtractionResult::default()
        });
        outcome.narrative = Some("Quiet week ahead.\n".to_string());
        outcome.errors.push("Failed to retrieve something.".to_string());

        let text = Report(&outcome).to_string();
        assert!(text.contains("== Alerts: FL (No active alerts) =="));
        assert!(text.contains(TRUNCATION_NOTICE));
        assert!(text.contains("Coastal Power (natural gas, 512.0 MW): Storm surge"));
        assert!(text.contains("== Insight ==\nQuiet week ahead.\n"));
        assert!(text.ends_with("Failed to retrieve something.\n"));
    }

    #[test]
    fn test_fallback_text_shown_without_matches() {
        let mut outcome = QueryOutcome::begin(1, "FL");
        outcome.extraction = Some(ExtractionResult {
            fallback_text: Some(CANONICAL_NO_RISK.to_string()),
            ..ExtractionResult::default()
        });

        let text = Report(&outcome).to_string();
        assert!(text.contains(CANONICAL_NO_RISK));
        assert!(!text.contains(TRUNCATION_NOTICE));
    }

    /// A sink that refuses all output.
    struct ClosedSink;

    impl fmt::Write for ClosedSink {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        use std::fmt::Write;

        let mut outcome = QueryOutcome::begin(1, "FL");
        outcome.narrative = Some("text".to_string());
        assert!(write!(ClosedSink, "{}", Report(&outcome)).is_err());

        let err = QueryError::InputValidation("bad".into());
        let fatal = QueryOutcome::failed(2, "", None, &err);
        assert!(write!(ClosedSink, "{}", Report(&fatal)).is_err());
    }

    #[test]
    fn test_capacity_formatting() {
        assert_eq!(capacity(&plant(None)), "N/A");
        assert_eq!(capacity(&plant(Some(12.345))), "12.3 MW");
    }
}
