//! A source that always fails.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use grid_core::{
    AlertReport, AlertSource, FacilityDirectory, FacilityDirectoryResult, FacilityRecord,
    InsightGenerator, RegionCode, SourceError,
};

/// A source that fails every call with the same error.
///
/// Implements all three source traits, so one type covers every failure
/// scenario.
#[derive(Debug)]
pub struct FailingSource {
    error: SourceError,
    calls: AtomicUsize,
}

impl FailingSource {
    /// Fail with the given error.
    pub fn new(error: SourceError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail with a transport error carrying the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(SourceError::Transport(message.into()))
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

#[async_trait]
impl AlertSource for FailingSource {
    async fn fetch_alerts(&self, _region: &str) -> Result<AlertReport, SourceError> {
        self.fail()
    }

    fn name(&self) -> &str {
        "FailingSource"
    }
}

#[async_trait]
impl FacilityDirectory for FailingSource {
    async fn fetch_facilities(&self) -> Result<FacilityDirectoryResult, SourceError> {
        self.fail()
    }

    fn name(&self) -> &str {
        "FailingSource"
    }
}

#[async_trait]
impl InsightGenerator for FailingSource {
    async fn generate_insight(
        &self,
        _region: &RegionCode,
        _report: &AlertReport,
        _facilities: &[FacilityRecord],
        _truncated: bool,
    ) -> Result<String, SourceError> {
        self.fail()
    }

    fn name(&self) -> &str {
        "FailingSource"
    }
}
