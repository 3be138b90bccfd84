//! Core traits and types for the Stormwatch data sources.
//!
//! This crate provides the shared interface between the orchestrator and
//! the three upstream collaborators it coordinates. It defines:
//!
//! - [`AlertSource`] - Active severe-weather alerts for a region
//! - [`FacilityDirectory`] - The power-generation facility list
//! - [`InsightGenerator`] - Narrative risk analysis from an LLM
//! - [`AlertReport`] / [`FacilityRecord`] - The normalized data they exchange
//! - [`SourceError`] - Error type shared by all three boundaries
//!
//! # Example
//!
//! ```rust
//! use grid_core::{async_trait, AlertReport, AlertSource, RegionCode, SourceError};
//!
//! struct QuietSkies;
//!
//! #[async_trait]
//! impl AlertSource for QuietSkies {
//!     async fn fetch_alerts(&self, region: &str) -> Result<AlertReport, SourceError> {
//!         let code = RegionCode::parse(region)?;
//!         Ok(AlertReport::no_active_alerts(code.as_str()))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "QuietSkies"
//!     }
//! }
//! ```

mod alert;
mod error;
mod facility;
mod narrative;
mod region;
mod sources;

pub use alert::{AlertItem, AlertReport, Severity, NO_ACTIVE_ALERTS, NO_ACTIVE_ALERTS_DESCRIPTION};
pub use error::SourceError;
pub use facility::{FacilityDirectoryResult, FacilityKey, FacilityRecord};
pub use narrative::{AFFECTED_PLANTS_HEADING, NO_PLANTS_AT_RISK, NO_PLANTS_AT_RISK_PHRASE};
pub use region::RegionCode;
pub use sources::{AlertSource, FacilityDirectory, InsightGenerator};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
