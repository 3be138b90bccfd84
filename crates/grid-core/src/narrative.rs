//! Markers shared between the narrative prompt and the narrative extractor.

/// Heading that introduces the affected-facility section of a narrative.
pub const AFFECTED_PLANTS_HEADING: &str = "### Top 3 Affected Power Plants:";

/// Sentence the model is asked to use when no listed facility is at risk.
pub const NO_PLANTS_AT_RISK: &str =
    "No specific power plants identified as significantly at risk based on current alerts and provided data.";

/// Lower-cased phrase that marks a "no facilities at risk" section.
pub const NO_PLANTS_AT_RISK_PHRASE: &str = "no specific power plants identified";
