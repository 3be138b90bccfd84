//! Delayed source - wraps another source with artificial delay.

use std::time::Duration;

use async_trait::async_trait;
use grid_core::{
    AlertReport, AlertSource, FacilityDirectory, FacilityDirectoryResult, FacilityRecord,
    InsightGenerator, RegionCode, SourceError,
};
use tokio::time::sleep;

/// A source that wraps another source and adds artificial delay.
///
/// Useful for simulating network latency and overlapping queries.
pub struct Delayed<S> {
    inner: S,
    delay: Duration,
}

impl<S> Delayed<S> {
    /// Wrap the given source with the specified delay.
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Wrap the given source with a delay in milliseconds.
    pub fn with_millis(inner: S, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: AlertSource> AlertSource for Delayed<S> {
    async fn fetch_alerts(&self, region: &str) -> Result<AlertReport, SourceError> {
        sleep(self.delay).await;
        self.inner.fetch_alerts(region).await
    }

    fn name(&self) -> &str {
        "Delayed"
    }
}

#[async_trait]
impl<S: FacilityDirectory> FacilityDirectory for Delayed<S> {
    async fn fetch_facilities(&self) -> Result<FacilityDirectoryResult, SourceError> {
        sleep(self.delay).await;
        self.inner.fetch_facilities().await
    }

    fn name(&self) -> &str {
        "Delayed"
    }
}

#[async_trait]
impl<S: InsightGenerator> InsightGenerator for Delayed<S> {
    async fn generate_insight(
        &self,
        region: &RegionCode,
        report: &AlertReport,
        facilities: &[FacilityRecord],
        truncated: bool,
    ) -> Result<String, SourceError> {
        sleep(self.delay).await;
        self.inner
            .generate_insight(region, report, facilities, truncated)
            .await
    }

    fn name(&self) -> &str {
        "Delayed"
    }
}
