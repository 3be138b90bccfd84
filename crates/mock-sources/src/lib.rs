//! Mock data sources for testing the orchestrator.
//!
//! This crate provides deterministic implementations of the three
//! collaborator traits in `grid-core`:
//! - `StaticAlerts` / `StaticFacilities` / `StaticInsight` - Return fixed data
//! - `FailingSource` - Fails every call with a configured error
//! - `Delayed` - Wraps another source with artificial delay
//!
//! Every mock counts its calls so tests can assert which sources were
//! reached.
//!
//! # Example
//!
//! ```rust
//! use mock_sources::{AlertSource, StaticAlerts};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_sources::SourceError> {
//!     let alerts = StaticAlerts::quiet();
//!
//!     let report = alerts.fetch_alerts("ca").await?;
//!     assert!(report.is_no_active_alerts());
//!     assert_eq!(alerts.calls(), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod fixed;

// Re-export grid-core types for convenience
pub use grid_core::{
    async_trait, AlertItem, AlertReport, AlertSource, FacilityDirectory, FacilityDirectoryResult,
    FacilityRecord, InsightGenerator, RegionCode, SourceError,
};

pub use delayed::Delayed;
pub use failing::FailingSource;
pub use fixed::{InsightCall, StaticAlerts, StaticFacilities, StaticInsight};
