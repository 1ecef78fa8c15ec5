//! Bounded-concurrency bulk operations.

use std::fmt::Write as _;
use std::future::Future;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Operations in flight at once.
pub const BULK_CONCURRENCY: usize = 5;

/// Outcome for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItemResult {
    /// Identifier.
    pub id: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-identifier outcomes of a bulk run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReport {
    /// Outcomes.
    pub results: Vec<BulkItemResult>,
}

impl BulkReport {
    /// Number of successful items.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of failed items.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Failed items.
    pub fn failures(&self) -> impl Iterator<Item = &BulkItemResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Human-readable summary listing every failure.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} of {} succeeded, {} failed",
            self.succeeded(),
            self.results.len(),
            self.failed()
        );
        for failure in self.failures() {
            let _ = write!(
                out,
                "\n- {}: {}",
                failure.id,
                failure.error.as_deref().unwrap_or("unknown error")
            );
        }
        out
    }
}

/// Runs `op` for every id, `batch_size` at a time.
///
/// Batches run strictly one after another; within a batch every operation
/// runs concurrently and all of them settle before the next batch starts.
/// Failures are recorded and never stop the run.
pub async fn run_batched<'a, F, Fut>(ids: &'a [String], batch_size: usize, op: F) -> BulkReport
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut results = Vec::with_capacity(ids.len());

    for (batch_no, batch) in ids.chunks(batch_size.max(1)).enumerate() {
        debug!(batch = batch_no + 1, size = batch.len(), "running batch");
        let outcomes = join_all(batch.iter().map(|id| op(id.as_str()))).await;

        for (id, outcome) in batch.iter().zip(outcomes) {
            let result = match outcome {
                Ok(()) => BulkItemResult {
                    id: id.clone(),
                    success: true,
                    error: None,
                },
                Err(e) => {
                    warn!(id = %id, error = %e, "bulk item failed");
                    BulkItemResult {
                        id: id.clone(),
                        success: false,
                        error: Some(e.to_string()),
                    }
                }
            };
            results.push(result);
        }
    }

    let report = BulkReport { results };
    info!(
        total = report.results.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "bulk run finished"
    );
    report
}
