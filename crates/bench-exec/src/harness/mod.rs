mod proc;
pub use proc::{ProcHarness, ProcHarnessConfig};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use bench_model::{BenchmarkId, CapacityLease};

use crate::error::HarnessError;

/// What the harness hands back for a finished benchmark.
#[derive(Debug, Clone)]
pub struct ExecReport {
    pub exit_code: Option<i32>,
    /// Opaque reference to wherever the harness persisted its results.
    pub output_ref: Option<String>,
}

/// Capability seam for running one benchmark on its leased runner.
///
/// `cancel` fires when the job's time budget is exhausted; implementations
/// must tear down their own process only, never a sibling's.
#[async_trait]
pub trait Harness: Send + Sync {
    async fn execute(
        &self,
        benchmark: &BenchmarkId,
        lease: &CapacityLease,
        cancel: CancellationToken,
    ) -> Result<ExecReport, HarnessError>;
}
