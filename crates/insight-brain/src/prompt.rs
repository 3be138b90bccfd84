//! Prompt construction for the insight request.

use std::fmt::Write;

use grid_core::{
    AlertItem, AlertReport, FacilityRecord, RegionCode, AFFECTED_PLANTS_HEADING,
    NO_PLANTS_AT_RISK,
};

/// Maximum facilities included in the prompt, largest capacity first.
const MAX_PROMPT_FACILITIES: usize = 20;

const MAX_DESCRIPTION_CHARS: usize = 250;
const MAX_INSTRUCTION_CHARS: usize = 200;

/// Built-in system prompt used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an impact-investing analyst. You assess how \
active severe-weather alerts (warnings, watches, advisories) affect sectors such as energy, \
utilities, agriculture, infrastructure, insurance and supply chains, with particular attention \
to power generation assets. Focus on immediate and short-term impacts, resilience and safety. \
Be concise, structured and specific.";

/// Render one alert as a prompt block.
pub fn format_alert(alert: &AlertItem) -> String {
    let description = alert
        .description
        .as_deref()
        .map(|d| truncate_chars(d, MAX_DESCRIPTION_CHARS))
        .unwrap_or_else(|| "No detailed description provided.".to_string());
    let instruction = alert
        .instruction
        .as_deref()
        .map(|i| truncate_chars(i, MAX_INSTRUCTION_CHARS))
        .unwrap_or_else(|| "No specific instruction provided.".to_string());

    format!(
        "---\nAlert Event: {}\nSeverity: {}\nHeadline: {}\nAffected Areas: {}\nTiming: {}\nDescription: {}\nInstruction: {}\n---\n",
        alert.event,
        alert.severity,
        alert.summary,
        alert.area.as_deref().unwrap_or("Not specified"),
        alert.window,
        description,
        instruction,
    )
}

/// Render one facility as a prompt bullet.
pub fn format_facility(plant: &FacilityRecord) -> String {
    let capacity = plant
        .capacity_mw
        .map(|mw| format!("{:.1}", mw))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "- Utility Name: {}\n  Primary Source: {}\n  State: {}\n  Capacity: {} MW\n  Approx. Location (Lat/Lon): {:.3}, {:.3}\n",
        or_na(&plant.utility_name),
        or_na(&plant.primary_source),
        or_na(&plant.state),
        capacity,
        plant.latitude,
        plant.longitude,
    )
}

/// Build the user prompt for a region.
pub fn build_prompt(
    region: &RegionCode,
    report: &AlertReport,
    facilities: &[FacilityRecord],
    truncated: bool,
) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Queried region: {}", region);
    let _ = writeln!(prompt, "Region label: {}", report.region);
    let _ = writeln!(
        prompt,
        "Overall alert status: {} - {}\n",
        report.headline_event, report.headline_description
    );

    prompt.push_str("Active alerts:\n");
    prompt.push_str(&alerts_context(report));
    prompt.push('\n');

    prompt.push_str("Power infrastructure:\n");
    prompt.push_str(&facilities_context(region, facilities, truncated));
    prompt.push('\n');

    prompt.push_str(
        "Write an impact-investment analysis for this region based on the alerts and the \
power infrastructure above. Use markdown headings (\"### 1. ...\") and cover, in 2-3 lines each:\n\
1. Immediate investment opportunities and needs (grid stability, emergency power, repair services).\n\
2. Potential risks and urgent mitigation, including risks to generation and transmission.\n\
3. Sector-specific impacts, explicitly including the energy sector.\n\
4. Short-term resilience and preparedness (backup power, microgrids).\n\
5. Investor actions.\n\
6. Overall outlook given the alerts.\n\
7. Three stocks to watch that are most exposed to these events; if there are no active alerts, \
suggest names that benefit from stable conditions or resilient infrastructure.\n\n",
    );

    let _ = write!(
        prompt,
        "Finally, under the heading \"{heading}\", list the up to three plants from the power \
infrastructure list most likely to be significantly affected, one per line, exactly in this form:\n\
- Utility Name: <exact utility name from the list>, Primary Source: <exact primary source from the list> - Reason: <brief reason>\n\
If no listed plant is significantly at risk, write exactly: \"{none}\"\n",
        heading = AFFECTED_PLANTS_HEADING,
        none = NO_PLANTS_AT_RISK,
    );

    prompt
}

fn alerts_context(report: &AlertReport) -> String {
    if report.has_alerts() {
        report.items.iter().map(format_alert).collect::<Vec<_>>().join("\n")
    } else if !report.is_no_active_alerts() {
        format!(
            "Primary Alert Condition: {}\nDescription: {}\n",
            report.headline_event, report.headline_description
        )
    } else {
        "No active alerts are reported for this region.\n".to_string()
    }
}

fn facilities_context(region: &RegionCode, facilities: &[FacilityRecord], truncated: bool) -> String {
    if facilities.is_empty() {
        return "No power plant data was provided or successfully retrieved for this analysis.\n"
            .to_string();
    }

    let mut sampled: Vec<&FacilityRecord> = facilities
        .iter()
        .filter(|plant| plant.capacity_mw.is_some())
        .collect();
    sampled.sort_by(|a, b| {
        b.capacity_mw
            .unwrap_or_default()
            .total_cmp(&a.capacity_mw.unwrap_or_default())
    });
    sampled.truncate(MAX_PROMPT_FACILITIES);

    let mut context = format!(
        "A sample of power plants follows. Treat them as relevant if they operate in or near {}.\n",
        region
    );
    for plant in &sampled {
        context.push_str(&format_facility(plant));
    }

    if truncated {
        context.push_str(
            "(Note: this list is a sample from a larger dataset whose transfer limit was reached.)\n",
        );
    } else if facilities.len() > sampled.len() {
        let _ = writeln!(
            context,
            "(Note: showing {} of {} retrieved plants, largest capacity first.)",
            sampled.len(),
            facilities.len()
        );
    } else {
        let _ = writeln!(context, "(Showing all {} retrieved plants.)", facilities.len());
    }

    context
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> RegionCode {
        RegionCode::parse("CA").unwrap()
    }

    fn item(event: &str) -> AlertItem {
        AlertItem {
            event: event.to_string(),
            severity: "Severe".to_string(),
            summary: format!("{} in effect", event),
            window: "Effective: N/A to N/A".to_string(),
            description: Some("x".repeat(400)),
            instruction: None,
            area: Some("Fresno".to_string()),
        }
    }

    fn plant(name: &str, mw: Option<f64>) -> FacilityRecord {
        FacilityRecord {
            utility_name: name.to_string(),
            primary_source: "solar".to_string(),
            state: "CA".to_string(),
            capacity_mw: mw,
            longitude: -119.77,
            latitude: 36.74,
        }
    }

    #[test]
    fn test_format_alert_truncates_description() {
        let block = format_alert(&item("Flood Warning"));
        assert!(block.contains("Alert Event: Flood Warning"));
        assert!(block.contains(&format!("{}...", "x".repeat(250))));
        assert!(!block.contains(&"x".repeat(251)));
        assert!(block.contains("No specific instruction provided."));
    }

    #[test]
    fn test_format_facility() {
        let line = format_facility(&plant("Valley Solar", Some(123.456)));
        assert!(line.contains("Utility Name: Valley Solar"));
        assert!(line.contains("Capacity: 123.5 MW"));
        assert!(line.contains("36.740, -119.770"));

        let unknown = format_facility(&plant("", None));
        assert!(unknown.contains("Utility Name: N/A"));
        assert!(unknown.contains("Capacity: N/A MW"));
    }

    #[test]
    fn test_prompt_asks_for_extractable_section() {
        let report = AlertReport::no_active_alerts("CA (No active alerts)");
        let prompt = build_prompt(&region(), &report, &[], false);

        assert!(prompt.contains(AFFECTED_PLANTS_HEADING));
        assert!(prompt.contains(NO_PLANTS_AT_RISK));
        assert!(prompt.contains("- Utility Name: <exact utility name from the list>, Primary Source:"));
        assert!(prompt.contains("No active alerts are reported"));
        assert!(prompt.contains("No power plant data was provided"));
    }

    #[test]
    fn test_facility_sample_sorted_and_capped() {
        let mut plants: Vec<FacilityRecord> = (0..25)
            .map(|i| plant(&format!("Plant {:02}", i), Some(i as f64)))
            .collect();
        plants.push(plant("Unknown Capacity", None));

        let context = facilities_context(&region(), &plants, false);
        assert_eq!(context.matches("- Utility Name:").count(), 20);
        // Largest first, smallest five dropped
        assert!(context.find("Plant 24").unwrap() < context.find("Plant 23").unwrap());
        assert!(!context.contains("Plant 04"));
        assert!(!context.contains("Unknown Capacity"));
        assert!(context.contains("showing 20 of 26"));
    }

    #[test]
    fn test_truncation_note() {
        let plants = vec![plant("Only One", Some(5.0))];
        let context = facilities_context(&region(), &plants, true);
        assert!(context.contains("transfer limit was reached"));

        let context = facilities_context(&region(), &plants, false);
        assert!(context.contains("Showing all 1 retrieved plants"));
    }

    #[test]
    fn test_headline_only_alert_context() {
        let mut report = AlertReport::no_active_alerts("TX");
        report.headline_event = "Red Flag Warning".to_string();
        report.headline_description = "Critical fire weather".to_string();

        let context = alerts_context(&report);
        assert!(context.contains("Primary Alert Condition: Red Flag Warning"));
    }
}
