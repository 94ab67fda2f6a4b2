use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use bench_exec::{Harness, dispatch_all};
use bench_model::{
    JobList, JobOutcome, JobRecord, RunReport, RunStatus, SelectionRequest,
};
use bench_provision::{CapacityClient, ProvisioningAborted, provision_all};

use crate::error::ResolveError;
use crate::{ResolveConfig, resolve};

/// Top-level coordinator: resolve, provision, dispatch.
///
/// The resolved job list is the shared unit of work across all three stages.
/// Provisioning is fail-fast across the batch; execution is fail-open per
/// job. There is no retry at any stage.
pub struct Orchestrator {
    resolve_cfg: ResolveConfig,
    client: Arc<dyn CapacityClient>,
    harness: Arc<dyn Harness>,
    budget: Duration,
}

impl Orchestrator {
    pub fn new(
        resolve_cfg: ResolveConfig,
        client: Arc<dyn CapacityClient>,
        harness: Arc<dyn Harness>,
        budget: Duration,
    ) -> Self {
        Self {
            resolve_cfg,
            client,
            harness,
            budget,
        }
    }

    #[instrument(level = "info", skip(self, request), fields(mode = ?request.mode))]
    pub async fn run(&self, request: &SelectionRequest) -> RunReport {
        let jobs = match resolve(request, &self.resolve_cfg) {
            Ok(jobs) => jobs,
            Err(ResolveError::EmptySelection) => {
                warn!(target: "bench.core", "selection resolved to zero benchmarks; nothing to run");
                return RunReport::new(RunStatus::EmptySelection, Vec::new());
            }
        };
        info!(target: "bench.core", jobs = jobs.len(), "job list resolved");

        let leased = match provision_all(&jobs, self.client.as_ref()).await {
            Ok(leased) => leased,
            Err(aborted) => {
                warn!(
                    target: "bench.core",
                    failed = aborted.failures.len(),
                    "provisioning aborted; execution will not start for any job"
                );
                let records = provision_failure_records(&jobs, &aborted);
                return RunReport::new(RunStatus::ProvisioningAborted, records);
            }
        };

        let records = dispatch_all(leased, Arc::clone(&self.harness), self.budget).await;
        info!(
            target: "bench.core",
            settled = records.iter().filter(|r| r.outcome.is_settled()).count(),
            "run completed"
        );
        RunReport::new(RunStatus::Completed, records)
    }
}

/// Per-job records for an aborted provisioning stage.
///
/// Jobs whose call succeeded are reported as `Provisioned`; their discarded
/// leases never reach execution.
fn provision_failure_records(jobs: &JobList, aborted: &ProvisioningAborted) -> Vec<JobRecord> {
    jobs.iter()
        .map(|id| match aborted.failures.iter().find(|(fid, _)| fid == id) {
            Some((_, e)) => JobRecord {
                id: id.clone(),
                outcome: JobOutcome::ProvisionFailed,
                detail: Some(e.to_string()),
            },
            None => JobRecord {
                id: id.clone(),
                outcome: JobOutcome::Provisioned,
                detail: None,
            },
        })
        .collect()
}
