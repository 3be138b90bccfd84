//! Extraction of affected facilities from an insight narrative.
//!
//! The insight generator is asked to end its answer with a section like:
//!
//! ```text
//! ### Top 3 Affected Power Plants:
//! - Utility Name: Sunbelt Power, Primary Source: solar - Reason: Hail warning over the array.
//! ```
//!
//! Each bullet is matched against the facility directory. Extraction never
//! fails: text that does not fit the expected shape is skipped, and the
//! section body is kept as fallback text for the caller to show.

use std::collections::HashSet;
use std::sync::LazyLock;

use grid_core::{
    FacilityKey, FacilityRecord, AFFECTED_PLANTS_HEADING, NO_PLANTS_AT_RISK_PHRASE,
};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Fallback text used when the narrative reports no facility at risk.
pub const CANONICAL_NO_RISK: &str = "Analysis indicates no specific power plants from the provided list are at significantly elevated risk based on current alerts.";

static BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s*Utility Name:\s*(.*?),\s*Primary Source:\s*(.*?)\s*-\s*Reason:\s*(.*)$")
        .expect("valid bullet regex")
});

/// A directory facility named in the narrative, with the stated reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedAffectedFacility {
    pub facility: FacilityRecord,
    pub reason: String,
}

/// Facilities extracted from one narrative.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Matched facilities in narrative order, without duplicates.
    pub facilities: Vec<ExtractedAffectedFacility>,
    /// Body of the affected-facilities section, or [`CANONICAL_NO_RISK`].
    ///
    /// Kept even when facilities matched; callers decide whether to show it.
    pub fallback_text: Option<String>,
    /// Reason per matched facility, for annotating map or list views.
    pub reasons: IndexMap<FacilityKey, String>,
}

impl ExtractionResult {
    fn with_fallback(text: &str) -> Self {
        Self {
            fallback_text: Some(text.to_string()).filter(|t| !t.is_empty()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// True when the narrative reported that no facility is at risk.
    pub fn is_no_risk(&self) -> bool {
        self.fallback_text.as_deref() == Some(CANONICAL_NO_RISK)
    }

    /// Reason given for a facility, if it was matched.
    pub fn reason_for(&self, facility: &FacilityRecord) -> Option<&str> {
        self.reasons.get(&facility.key()).map(String::as_str)
    }
}

/// Extract the affected facilities a narrative names.
///
/// Returns an empty result with no fallback text when the narrative has no
/// affected-facilities section.
pub fn extract_affected_facilities(
    narrative: &str,
    directory: &[FacilityRecord],
) -> ExtractionResult {
    let Some(start) = narrative.find(AFFECTED_PLANTS_HEADING) else {
        return ExtractionResult::default();
    };

    let after = &narrative[start + AFFECTED_PLANTS_HEADING.len()..];
    let section = match after.find("\n### ") {
        Some(end) => &after[..end],
        None => after,
    }
    .trim();

    if section.to_lowercase().contains(NO_PLANTS_AT_RISK_PHRASE) {
        return ExtractionResult::with_fallback(CANONICAL_NO_RISK);
    }

    let mut result = ExtractionResult::with_fallback(section);
    if directory.is_empty() {
        return result;
    }

    let mut seen = HashSet::new();

    for line in section.lines().map(str::trim) {
        if !line.starts_with("- Utility Name:") {
            continue;
        }
        let Some(caps) = BULLET.captures(line) else {
            debug!("Skipping malformed facility bullet: {}", line);
            continue;
        };

        let name = caps[1].trim().to_lowercase();
        let source = caps[2].trim().to_lowercase();
        let reason = caps[3].trim();
        if name.is_empty() {
            continue;
        }

        let Some(facility) = directory.iter().find(|f| {
            f.utility_name.to_lowercase().contains(&name)
                && f.primary_source.to_lowercase() == source
        }) else {
            debug!("No directory match for \"{}\" ({})", name, source);
            continue;
        };

        let key = facility.key();
        if !seen.insert(key.clone()) {
            continue;
        }
        result.reasons.insert(key, reason.to_string());
        result.facilities.push(ExtractedAffectedFacility {
            facility: facility.clone(),
            reason: reason.to_string(),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_core::NO_PLANTS_AT_RISK;

    fn plant(name: &str, source: &str, mw: f64) -> FacilityRecord {
        FacilityRecord {
            utility_name: name.to_string(),
            primary_source: source.to_string(),
            state: "TX".to_string(),
            capacity_mw: Some(mw),
            longitude: -97.7,
            latitude: 30.2,
        }
    }

    fn directory() -> Vec<FacilityRecord> {
        vec![
            plant("Lone Star Energy", "natural gas", 1200.0),
            plant("Lone Star Energy", "wind", 300.0),
            plant("Gulf Coast Solar Partners", "solar", 150.0),
            plant("Hill Country Hydro", "hydroelectric", 80.0),
        ]
    }

    fn narrative(section: &str) -> String {
        format!(
            "### Summary\nHeavy storms expected.\n\n{}\n{}\n\n### Outlook\n- Utility Name: Hill Country Hydro, Primary Source: hydroelectric - Reason: outside section",
            AFFECTED_PLANTS_HEADING, section
        )
    }

    #[test]
    fn test_matches_bullets_in_order() {
        let text = narrative(
            "- Utility Name: Gulf Coast Solar, Primary Source: Solar - Reason: Hail over the array.\n\
             - Utility Name: lone star energy, Primary Source: natural gas - Reason: Flooding near intake.",
        );
        let result = extract_affected_facilities(&text, &directory());

        assert_eq!(result.facilities.len(), 2);
        assert_eq!(result.facilities[0].facility.utility_name, "Gulf Coast Solar Partners");
        assert_eq!(result.facilities[0].reason, "Hail over the array.");
        assert_eq!(result.facilities[1].facility.primary_source, "natural gas");
        // The section body is kept alongside the matches
        assert!(result
            .fallback_text
            .as_deref()
            .is_some_and(|t| t.ends_with("Flooding near intake.")));
        assert_eq!(
            result.reason_for(&directory()[0]),
            Some("Flooding near intake.")
        );
    }

    #[test]
    fn test_case_insensitive_match() {
        let dir = vec![plant("Riverside Solar Farm", "Solar", 250.0)];
        let text = narrative("- Utility Name: riverside solar, Primary Source: solar - Reason: hail");
        let result = extract_affected_facilities(&text, &dir);
        assert_eq!(result.facilities.len(), 1);
        assert_eq!(result.reason_for(&dir[0]), Some("hail"));
    }

    #[test]
    fn test_stops_at_next_heading() {
        let text = narrative(
            "- Utility Name: Lone Star, Primary Source: wind - Reason: High winds.",
        );
        let result = extract_affected_facilities(&text, &directory());

        assert_eq!(result.facilities.len(), 1);
        assert_eq!(result.facilities[0].facility.primary_source, "wind");
        assert!(result
            .facilities
            .iter()
            .all(|f| f.facility.utility_name != "Hill Country Hydro"));
    }

    #[test]
    fn test_duplicates_collapse_to_first_reason() {
        let text = narrative(
            "- Utility Name: Lone Star Energy, Primary Source: wind - Reason: first\n\
             - Utility Name: Lone Star, Primary Source: wind - Reason: second",
        );
        let result = extract_affected_facilities(&text, &directory());

        assert_eq!(result.facilities.len(), 1);
        assert_eq!(result.facilities[0].reason, "first");
        assert_eq!(result.reasons.len(), 1);
    }

    #[test]
    fn test_no_risk_phrase() {
        let text = narrative(NO_PLANTS_AT_RISK);
        let result = extract_affected_facilities(&text, &directory());

        assert!(result.is_empty());
        assert!(result.is_no_risk());
        assert_eq!(result.fallback_text.as_deref(), Some(CANONICAL_NO_RISK));

        // Case-insensitive, and checked before the directory
        let shouting = narrative("NO SPECIFIC POWER PLANTS IDENTIFIED at this time.");
        let result = extract_affected_facilities(&shouting, &[]);
        assert!(result.is_no_risk());
    }

    #[test]
    fn test_missing_section() {
        for text in ["Storms likely. Hedge gas exposure.", "", "### Top 5 Affected Plants:\n- x"] {
            let result = extract_affected_facilities(text, &directory());
            assert_eq!(result, ExtractionResult::default());
            assert!(result.fallback_text.is_none());
        }
    }

    #[test]
    fn test_empty_section_does_not_read_next_heading() {
        let text = format!(
            "{}\n\n### Next\n- Utility Name: Lone Star Energy, Primary Source: wind - Reason: later section",
            AFFECTED_PLANTS_HEADING
        );
        let result = extract_affected_facilities(&text, &directory());
        assert!(result.is_empty());
        assert!(result.reasons.is_empty());
        assert!(result.fallback_text.is_none());

        let text = format!("{}\n\n### Next\nfoo", AFFECTED_PLANTS_HEADING);
        assert!(extract_affected_facilities(&text, &[]).fallback_text.is_none());
    }

    #[test]
    fn test_empty_utility_name_is_skipped() {
        let section = "- Utility Name: , Primary Source: wind - Reason: gusts\n\
                       - Utility Name:    , Primary Source: natural gas - Reason: flooding";
        let result = extract_affected_facilities(&narrative(section), &directory());
        // An empty name would otherwise match the first plant with that source
        assert!(result.is_empty());
        assert!(result.reasons.is_empty());
        assert!(result
            .fallback_text
            .as_deref()
            .is_some_and(|t| t.starts_with("- Utility Name: , Primary Source: wind")));
    }

    #[test]
    fn test_three_matches_with_duplicate_and_noise() {
        let matched = [
            "- Utility Name: Gulf Coast Solar, Primary Source: solar - Reason: hail",
            "- Utility Name: Lone Star Energy, Primary Source: natural gas - Reason: flooding",
            "- Utility Name: Hill Country, Primary Source: hydroelectric - Reason: flash floods",
        ];
        let duplicate = "- Utility Name: gulf coast, Primary Source: Solar - Reason: again";
        let unmatched = [
            "- Utility Name: Unknown Co, Primary Source: coal - Reason: not listed",
            "- Utility Name: Nowhere Power, Primary Source: wind - Reason: not listed",
        ];

        let orderings = [
            vec![unmatched[0], matched[0], matched[1], unmatched[1], matched[2], duplicate],
            vec![matched[0], matched[1], matched[2], duplicate, unmatched[0], unmatched[1]],
            vec![unmatched[1], unmatched[0], matched[0], duplicate, matched[1], matched[2]],
        ];

        for lines in orderings {
            let result = extract_affected_facilities(&narrative(&lines.join("\n")), &directory());

            let names: Vec<&str> = result
                .facilities
                .iter()
                .map(|f| f.facility.utility_name.as_str())
                .collect();
            assert_eq!(
                names,
                ["Gulf Coast Solar Partners", "Lone Star Energy", "Hill Country Hydro"]
            );
            let reasons: Vec<&str> = result.facilities.iter().map(|f| f.reason.as_str()).collect();
            assert_eq!(reasons, ["hail", "flooding", "flash floods"]);
            assert_eq!(result.reasons.len(), 3);
            assert_eq!(result.reason_for(&directory()[2]), Some("hail"));
        }
    }

    #[test]
    fn test_empty_directory() {
        let section = "- Utility Name: Lone Star Energy, Primary Source: wind - Reason: High winds.";
        let result = extract_affected_facilities(&narrative(section), &[]);
        assert!(result.is_empty());
        assert!(result.reasons.is_empty());
        assert_eq!(result.fallback_text.as_deref(), Some(section));
    }

    #[test]
    fn test_unmatched_and_malformed_bullets() {
        let text = narrative(
            "- Utility Name: Unknown Utility, Primary Source: wind - Reason: nope\n\
             - Utility Name: Lone Star Energy, Primary Source: coal - Reason: wrong source\n\
             - Utility Name: Lone Star Energy Primary Source wind\n\
             - utility name: lone star energy, primary source: wind - reason: lower labels\n\
             * Utility Name: Lone Star Energy, Primary Source: wind - Reason: wrong bullet",
        );
        let result = extract_affected_facilities(&text, &directory());
        assert!(result.is_empty());
        assert!(result.reasons.is_empty());
        assert!(result
            .fallback_text
            .as_deref()
            .is_some_and(|t| t.starts_with("- Utility Name: Unknown Utility")));
    }

    #[test]
    fn test_tolerates_extra_whitespace_and_indent() {
        let text = narrative(
            "   - Utility Name:   Hill Country  ,   Primary Source:  Hydroelectric   -   Reason:   Flash flooding.   ",
        );
        let result = extract_affected_facilities(&text, &directory());
        assert_eq!(result.facilities.len(), 1);
        assert_eq!(result.facilities[0].reason, "Flash flooding.");
    }

    #[test]
    fn test_first_directory_match_wins() {
        let dir = vec![
            plant("Northern Wind Cooperative", "wind", 10.0),
            plant("Northern Wind", "wind", 500.0),
        ];
        let text = narrative("- Utility Name: Northern Wind, Primary Source: wind - Reason: gusts");
        let result = extract_affected_facilities(&text, &dir);
        assert_eq!(result.facilities.len(), 1);
        assert_eq!(result.facilities[0].facility.utility_name, "Northern Wind Cooperative");
    }

    #[test]
    fn test_results_are_subset_of_directory() {
        let dir = directory();
        let text = narrative(
            "- Utility Name: Energy, Primary Source: natural gas - Reason: a\n\
             - Utility Name: Solar, Primary Source: solar - Reason: b\n\
             - Utility Name: Hydro, Primary Source: hydroelectric - Reason: c",
        );
        let result = extract_affected_facilities(&text, &dir);
        assert_eq!(result.facilities.len(), 3);
        for extracted in &result.facilities {
            assert!(dir.contains(&extracted.facility));
        }
    }

    #[test]
    fn test_heading_at_end_of_text() {
        let text = format!("Intro\n{}", AFFECTED_PLANTS_HEADING);
        let result = extract_affected_facilities(&text, &directory());
        assert!(result.is_empty());
        assert!(result.fallback_text.is_none());
    }
}
