//! Interactive session state with stale-result protection.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use crate::orchestrator::Orchestrator;
use crate::outcome::QueryOutcome;

/// Holds the currently visible outcome for a stream of queries.
///
/// Each submitted query takes the next sequence number. An outcome is only
/// committed if its sequence is still the latest, so a slow earlier query can
/// never overwrite the result of a newer one.
pub struct Session {
    orchestrator: Orchestrator,
    latest: AtomicU64,
    current: RwLock<QueryOutcome>,
}

impl Session {
    /// Create a session with an idle outcome.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            latest: AtomicU64::new(0),
            current: RwLock::new(QueryOutcome::default()),
        }
    }

    /// Register a new query and clear the visible outcome.
    ///
    /// Returns the sequence number the query's outcome must carry to be committed.
    pub async fn begin(&self, query: &str) -> u64 {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let mut current = self.current.write().await;
        if sequence > current.sequence {
            *current = QueryOutcome::begin(sequence, query);
        }
        sequence
    }

    /// Make an outcome visible if it belongs to the latest query.
    ///
    /// Returns false and drops the outcome when a newer query has begun.
    pub async fn commit(&self, outcome: QueryOutcome) -> bool {
        let mut current = self.current.write().await;
        if outcome.sequence != self.latest.load(Ordering::SeqCst)
            || outcome.sequence < current.sequence
        {
            debug!(
                "Discarding stale outcome #{} (latest is #{})",
                outcome.sequence,
                self.latest.load(Ordering::SeqCst)
            );
            return false;
        }
        *current = outcome;
        true
    }

    /// Run a query and commit its outcome.
    ///
    /// Returns the outcome if it became current, or `None` if a newer query
    /// superseded it while it ran.
    pub async fn submit(&self, query: &str) -> Option<QueryOutcome> {
        let sequence = self.begin(query).await;
        let outcome = self.orchestrator.run_sequenced(sequence, query).await;
        if self.commit(outcome.clone()).await {
            Some(outcome)
        } else {
            None
        }
    }

    /// Snapshot of the visible outcome.
    pub async fn current(&self) -> QueryOutcome {
        self.current.read().await.clone()
    }

    /// Sequence number of the most recently begun query.
    pub fn latest_sequence(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
