//! Query orchestration for storm-risk lookups.
//!
//! This crate provides the [`Orchestrator`], which turns a free-text query
//! into a [`QueryOutcome`] by calling three sources in order, and the
//! [`Session`], which keeps only the newest query's outcome visible.
//!
//! # Pipeline
//!
//! ```text
//! "Alerts for TX"
//!        ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                        │
//! │                                                          │
//! │  1. Extract region code (no calls if invalid)            │
//! │         ↓                                                │
//! │  2. Fetch alerts (failure ends the query)                │
//! │         ↓                                                │
//! │  3. Fetch facility directory (failure is recorded)       │
//! │         ↓                                                │
//! │  4. Generate insight narrative (failure is recorded)     │
//! │         ↓                                                │
//! │  5. Extract affected facilities from the narrative       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::from_env()?;
//!     let outcome = orchestrator.run("Alerts for TX").await;
//!
//!     if let Some(errors) = outcome.error_text() {
//!         eprintln!("{}", errors);
//!     }
//!     if let Some(narrative) = &outcome.narrative {
//!         println!("{}", narrative);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod extractor;
mod orchestrator;
mod outcome;
mod query;
mod session;

pub use error::{QueryError, Stage};
pub use extractor::{
    extract_affected_facilities, ExtractedAffectedFacility, ExtractionResult, CANONICAL_NO_RISK,
};
pub use orchestrator::{should_generate_insight, Orchestrator};
pub use outcome::QueryOutcome;
pub use query::{extract_region, EMPTY_QUERY_MESSAGE};
pub use session::Session;

// Re-export core types for convenience
pub use grid_core::{
    AlertReport, AlertSource, FacilityDirectory, FacilityDirectoryResult, FacilityRecord,
    InsightGenerator, RegionCode, SourceError,
};
