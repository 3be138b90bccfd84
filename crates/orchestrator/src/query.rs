//! Region-code extraction from free-text queries.

use std::sync::LazyLock;

use grid_core::RegionCode;
use regex::Regex;

use crate::error::QueryError;

static REGION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]{2}\b").expect("valid region token regex"));

/// Message shown for a blank query.
pub const EMPTY_QUERY_MESSAGE: &str =
    "Please enter a 2-letter region code (e.g. CA, NY) to check for active alerts.";

/// Extract the region code a query refers to.
///
/// Accepts a bare code ("tx") or a sentence containing one ("Alerts for CA").
/// When several two-letter words appear, one already written in upper case
/// wins over the first one found.
pub fn extract_region(query: &str) -> Result<RegionCode, QueryError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(QueryError::InputValidation(EMPTY_QUERY_MESSAGE.to_string()));
    }

    let tokens: Vec<&str> = REGION_TOKEN.find_iter(trimmed).map(|m| m.as_str()).collect();
    let candidate = tokens
        .iter()
        .find(|token| token.chars().all(|c| c.is_ascii_uppercase()))
        .or_else(|| tokens.first())
        .copied();

    let candidate = match candidate {
        Some(token) => token,
        None if trimmed.chars().count() == 2 => trimmed,
        None => {
            return Err(QueryError::InputValidation(format!(
                "Invalid input \"{}\". Enter a 2-letter region code (e.g. CA, TX) or a query like 'Alerts for CA'.",
                trimmed
            )))
        }
    };

    RegionCode::parse(candidate).map_err(|e| QueryError::InputValidation(e.to_string()))
}
