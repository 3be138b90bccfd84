//! Query pipeline: alerts, then facilities, then insight, then extraction.

use std::sync::Arc;

use grid_core::{AlertReport, AlertSource, FacilityDirectory, InsightGenerator, RegionCode, SourceError};
use insight_brain::InsightBrain;
use nws_alerts::{NwsAlertClient, NwsConfig};
use plant_directory::{ArcGisPlantDirectory, PlantDirectoryConfig};
use tracing::{debug, info, warn};

use crate::error::{QueryError, Stage};
use crate::extractor::extract_affected_facilities;
use crate::outcome::QueryOutcome;
use crate::query::extract_region;

/// Whether an insight should be requested for an alert report.
///
/// Every report that made it this far qualifies, including the no-alerts
/// sentinel, so a quiet region still gets a narrative.
pub fn should_generate_insight(report: &AlertReport) -> bool {
    report.has_alerts() || report.is_no_active_alerts() || !report.headline_event.is_empty()
}

/// Coordinates the three sources for one query at a time.
///
/// The sources are called strictly in order. Only an alert failure is fatal;
/// facility and insight failures are recorded on the outcome and the pipeline
/// carries on with what it has.
pub struct Orchestrator {
    alerts: Arc<dyn AlertSource>,
    facilities: Arc<dyn FacilityDirectory>,
    insight: Arc<dyn InsightGenerator>,
}

impl Orchestrator {
    /// Create an orchestrator over the given sources.
    pub fn new(
        alerts: Arc<dyn AlertSource>,
        facilities: Arc<dyn FacilityDirectory>,
        insight: Arc<dyn InsightGenerator>,
    ) -> Self {
        Self {
            alerts,
            facilities,
            insight,
        }
    }

    /// Create an orchestrator over the HTTP sources configured from the environment.
    ///
    /// A missing insight API key is not an error here; it surfaces on each
    /// query as a non-fatal insight failure.
    pub fn from_env() -> Result<Self, SourceError> {
        let alerts = NwsAlertClient::new(NwsConfig::from_env())?;
        let facilities = ArcGisPlantDirectory::new(PlantDirectoryConfig::from_env())?;
        let insight = InsightBrain::from_env()?;

        info!(
            "Sources: alerts={}, facilities={}, insight={}",
            alerts.name(),
            facilities.name(),
            insight.name()
        );

        Ok(Self::new(
            Arc::new(alerts),
            Arc::new(facilities),
            Arc::new(insight),
        ))
    }

    /// Run a query to completion. Failures are reported on the outcome.
    pub async fn run(&self, query: &str) -> QueryOutcome {
        self.run_sequenced(0, query).await
    }

    /// Run a query, returning fatal failures as errors.
    pub async fn run_checked(&self, query: &str) -> Result<QueryOutcome, QueryError> {
        let region = extract_region(query)?;
        let mut outcome = QueryOutcome::begin(0, query);
        outcome.region = Some(region.clone());
        self.gather(&region, &mut outcome).await?;
        outcome.in_flight = false;
        Ok(outcome)
    }

    pub(crate) async fn run_sequenced(&self, sequence: u64, query: &str) -> QueryOutcome {
        let region = match extract_region(query) {
            Ok(region) => region,
            Err(e) => {
                debug!("Rejected query {:?}: {}", query, e);
                return QueryOutcome::failed(sequence, query, None, &e);
            }
        };

        info!("Query #{} for region {}", sequence, region);
        let mut outcome = QueryOutcome::begin(sequence, query);
        outcome.region = Some(region.clone());

        if let Err(e) = self.gather(&region, &mut outcome).await {
            warn!("Query #{} failed: {}", sequence, e);
            return QueryOutcome::failed(sequence, query, Some(region), &e);
        }

        outcome.in_flight = false;
        outcome
    }

    async fn gather(&self, region: &RegionCode, outcome: &mut QueryOutcome) -> Result<(), QueryError> {
        let report = self
            .alerts
            .fetch_alerts(region.as_str())
            .await
            .map_err(|e| QueryError::from_source(Stage::Alerts, e))?;
        debug!(
            "Alerts for {}: {} item(s), headline {:?}",
            region,
            report.items.len(),
            report.headline_event
        );

        let directory = match self.facilities.fetch_facilities().await {
            Ok(directory) => {
                debug!(
                    "Fetched {} facilities (truncated: {})",
                    directory.len(),
                    directory.truncated
                );
                Some(directory)
            }
            Err(e) => {
                let err = QueryError::from_source(Stage::Facilities, e);
                warn!("Continuing without facilities: {}", err);
                outcome.push_error(&err);
                None
            }
        };

        if should_generate_insight(&report) {
            let (facilities, truncated) = directory
                .as_ref()
                .map(|d| (d.facilities.as_slice(), d.truncated))
                .unwrap_or((&[], false));

            match self
                .insight
                .generate_insight(region, &report, facilities, truncated)
                .await
            {
                Ok(narrative) => {
                    let extraction = extract_affected_facilities(&narrative, facilities);
                    debug!(
                        "Extracted {} affected facilities",
                        extraction.facilities.len()
                    );
                    outcome.narrative = Some(narrative);
                    outcome.extraction = Some(extraction);
                }
                Err(e) => {
                    let err = QueryError::from_source(Stage::Insight, e);
                    warn!("Insight unavailable: {}", err);
                    outcome.push_error(&err);
                }
            }
        } else {
            debug!("Skipping insight for {}", region);
        }

        outcome.alerts = Some(report);
        outcome.facilities = directory;
        Ok(())
    }
}
