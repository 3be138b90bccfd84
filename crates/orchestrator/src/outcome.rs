//! The observable result of one query.

use grid_core::{AlertReport, FacilityDirectoryResult, RegionCode};
use serde::Serialize;

use crate::error::QueryError;
use crate::extractor::ExtractionResult;

/// Everything one query produced.
///
/// Partial failures leave the successful parts in place and add a message to
/// `errors`. A fatal failure clears all data and sets `fatal`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryOutcome {
    /// Position of this query in its session. Later queries have larger values.
    pub sequence: u64,
    pub query: String,
    pub region: Option<RegionCode>,
    pub in_flight: bool,
    pub alerts: Option<AlertReport>,
    pub facilities: Option<FacilityDirectoryResult>,
    pub narrative: Option<String>,
    pub extraction: Option<ExtractionResult>,
    /// Non-fatal failures, in the order they occurred.
    pub errors: Vec<String>,
    /// The failure that ended the query, if any.
    pub fatal: Option<String>,
}

impl QueryOutcome {
    /// A fresh, in-flight outcome with no data.
    pub fn begin(sequence: u64, query: &str) -> Self {
        Self {
            sequence,
            query: query.to_string(),
            in_flight: true,
            ..Self::default()
        }
    }

    /// A finished outcome holding only a fatal error.
    pub fn failed(sequence: u64, query: &str, region: Option<RegionCode>, error: &QueryError) -> Self {
        Self {
            sequence,
            query: query.to_string(),
            region,
            fatal: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    /// True when the facility directory was fetched but cut short upstream.
    pub fn facilities_truncated(&self) -> bool {
        self.facilities.as_ref().is_some_and(|f| f.truncated)
    }

    /// All error messages joined by newlines, fatal first.
    pub fn error_text(&self) -> Option<String> {
        let messages: Vec<&str> = self
            .fatal
            .iter()
            .chain(self.errors.iter())
            .map(String::as_str)
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(messages.join("\n"))
        }
    }

    pub(crate) fn push_error(&mut self, error: &QueryError) {
        self.errors.push(error.to_string());
    }
}
