//! The collaborator traits the orchestrator depends on.

use async_trait::async_trait;

use crate::alert::AlertReport;
use crate::error::SourceError;
use crate::facility::{FacilityDirectoryResult, FacilityRecord};
use crate::region::RegionCode;

/// Source of active severe-weather alerts.
///
/// Implementations must accept a 2-letter code in any case, reject anything
/// else with [`SourceError::InvalidInput`], and return the sentinel
/// [`AlertReport::no_active_alerts`] report (not an error) when the upstream
/// legitimately has nothing to report.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Fetch the active alerts for a region code.
    async fn fetch_alerts(&self, region: &str) -> Result<AlertReport, SourceError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Directory of power-generation facilities.
///
/// A fetch is all-or-nothing: it never returns a partial list alongside an
/// error.
#[async_trait]
pub trait FacilityDirectory: Send + Sync {
    /// Fetch the (possibly truncated) facility list.
    async fn fetch_facilities(&self) -> Result<FacilityDirectoryResult, SourceError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Generator of narrative risk analysis.
///
/// The returned text carries no formatting guarantee beyond possibly
/// containing markdown section headings.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Generate a narrative for the region given its alerts and facilities.
    ///
    /// # Arguments
    ///
    /// * `region` - The queried region code.
    /// * `report` - Alerts for the region.
    /// * `facilities` - Facility context, empty when the directory failed.
    /// * `truncated` - Whether the facility list is a subset of the dataset.
    async fn generate_insight(
        &self,
        region: &RegionCode,
        report: &AlertReport,
        facilities: &[FacilityRecord],
        truncated: bool,
    ) -> Result<String, SourceError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
