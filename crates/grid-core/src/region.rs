//! Two-letter region codes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// A two-letter region code, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionCode(String);

impl RegionCode {
    /// Parse a region code. Accepts exactly two ASCII letters in any case.
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        let trimmed = input.trim();
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(SourceError::InvalidInput(format!(
                "invalid region code \"{}\"; expected a 2-letter code such as CA or TX",
                trimmed
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
