//! Error types for query orchestration.

use std::fmt;

use grid_core::SourceError;
use thiserror::Error;

/// The pipeline stage a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Alerts,
    Facilities,
    Insight,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Alerts => "weather alerts",
            Stage::Facilities => "power plant data",
            Stage::Insight => "investment insights",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while running a query.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// The query does not name a usable region. No source was called.
    #[error("{0}")]
    InputValidation(String),

    /// An upstream source failed.
    #[error("Failed to retrieve {stage}. {cause}")]
    SourceUnavailable {
        stage: Stage,
        #[source]
        cause: SourceError,
    },

    /// An upstream source answered with nothing usable.
    #[error("Failed to retrieve {stage}. Received an empty response from {detail}.")]
    EmptyUpstreamPayload { stage: Stage, detail: String },

    /// A source is missing its credential or other configuration.
    #[error("Failed to retrieve {stage}. Configuration error: {detail}")]
    Configuration { stage: Stage, detail: String },
}

impl QueryError {
    /// Classify a source failure for the given stage.
    pub fn from_source(stage: Stage, cause: SourceError) -> Self {
        match cause {
            SourceError::EmptyPayload(detail) => QueryError::EmptyUpstreamPayload { stage, detail },
            SourceError::Configuration(detail) => QueryError::Configuration { stage, detail },
            cause => QueryError::SourceUnavailable { stage, cause },
        }
    }
}
