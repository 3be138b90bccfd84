//! Sources that return fixed data.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use grid_core::{
    AlertReport, AlertSource, FacilityDirectory, FacilityDirectoryResult, FacilityRecord,
    InsightGenerator, RegionCode, SourceError,
};

/// An alert source that returns the same report for every region.
///
/// The region code is still validated, so malformed codes fail the way a
/// real source would.
#[derive(Debug)]
pub struct StaticAlerts {
    report: Option<AlertReport>,
    calls: AtomicUsize,
}

impl StaticAlerts {
    /// Always return the given report.
    pub fn new(report: AlertReport) -> Self {
        Self {
            report: Some(report),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always return the "no active alerts" sentinel for the requested region.
    pub fn quiet() -> Self {
        Self {
            report: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertSource for StaticAlerts {
    async fn fetch_alerts(&self, region: &str) -> Result<AlertReport, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let code = RegionCode::parse(region)?;
        Ok(match &self.report {
            Some(report) => report.clone(),
            None => AlertReport::no_active_alerts(format!("{} (No active alerts)", code)),
        })
    }

    fn name(&self) -> &str {
        "StaticAlerts"
    }
}

/// A facility directory that returns a fixed list.
#[derive(Debug)]
pub struct StaticFacilities {
    result: FacilityDirectoryResult,
    calls: AtomicUsize,
}

impl StaticFacilities {
    /// Return the given facilities, not truncated.
    pub fn new(facilities: Vec<FacilityRecord>) -> Self {
        Self::with_result(FacilityDirectoryResult::new(facilities, false))
    }

    /// Return the given facilities flagged as a truncated sample.
    pub fn truncated(facilities: Vec<FacilityRecord>) -> Self {
        Self::with_result(FacilityDirectoryResult::new(facilities, true))
    }

    /// Return an exact directory result.
    pub fn with_result(result: FacilityDirectoryResult) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FacilityDirectory for StaticFacilities {
    async fn fetch_facilities(&self) -> Result<FacilityDirectoryResult, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }

    fn name(&self) -> &str {
        "StaticFacilities"
    }
}

/// What an insight generator was asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightCall {
    pub region: String,
    pub headline_event: String,
    pub facility_count: usize,
    pub truncated: bool,
}

/// An insight generator that returns a fixed narrative and records each call.
#[derive(Debug)]
pub struct StaticInsight {
    narrative: String,
    calls: Mutex<Vec<InsightCall>>,
}

impl StaticInsight {
    /// Always return the given narrative.
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of generations requested so far.
    pub fn calls(&self) -> usize {
        self.recorded().len()
    }

    /// Every call made so far, oldest first.
    pub fn recorded(&self) -> Vec<InsightCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl InsightGenerator for StaticInsight {
    async fn generate_insight(
        &self,
        region: &RegionCode,
        report: &AlertReport,
        facilities: &[FacilityRecord],
        truncated: bool,
    ) -> Result<String, SourceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(InsightCall {
                region: region.to_string(),
                headline_event: report.headline_event.clone(),
                facility_count: facilities.len(),
                truncated,
            });
        }
        Ok(self.narrative.clone())
    }

    fn name(&self) -> &str {
        "StaticInsight"
    }
}
