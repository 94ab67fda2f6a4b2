use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use bench_model::{BenchmarkId, CapacityLease, JobOutcome, JobRecord};

use crate::harness::Harness;

/// Runs every leased job on its own runner, fail-open across the batch.
///
/// Jobs run concurrently; each is bounded by `budget`. A job that exceeds the
/// budget is cancelled (its own process reaped) and recorded as `TimedOut`,
/// distinct from `Failed`. One job's failure or timeout never touches a
/// sibling. The returned records preserve job-list order regardless of
/// completion order.
pub async fn dispatch_all(
    leased: Vec<(BenchmarkId, CapacityLease)>,
    harness: Arc<dyn Harness>,
    budget: Duration,
) -> Vec<JobRecord> {
    let runs = leased.into_iter().map(|(id, lease)| {
        let harness = Arc::clone(&harness);
        async move { run_one(harness, id, lease, budget).await }
    });

    let records = join_all(runs).await;
    info!(target: "bench.exec", jobs = records.len(), "dispatch complete");
    records
}

async fn run_one(
    harness: Arc<dyn Harness>,
    id: BenchmarkId,
    lease: CapacityLease,
    budget: Duration,
) -> JobRecord {
    let cancel = CancellationToken::new();

    let mut task = {
        let harness = Arc::clone(&harness);
        let id = id.clone();
        let token = cancel.child_token();
        tokio::spawn(async move { harness.execute(&id, &lease, token).await })
    };

    let (outcome, detail) = tokio::select! {
        joined = &mut task => match joined {
            Ok(Ok(report)) => (JobOutcome::Succeeded, report.output_ref),
            Ok(Err(e)) => {
                warn!(target: "bench.exec", benchmark = %id, error = %e, "benchmark failed");
                (JobOutcome::Failed, Some(e.to_string()))
            }
            Err(e) => {
                warn!(target: "bench.exec", benchmark = %id, error = %e, "harness task aborted");
                (JobOutcome::Failed, Some(format!("harness task aborted: {e}")))
            }
        },
        _ = tokio::time::sleep(budget) => {
            warn!(target: "bench.exec", benchmark = %id, budget_secs = budget.as_secs(), "time budget exceeded");
            cancel.cancel();
            // Wait for the harness to reap its process before reporting.
            let _ = task.await;
            (JobOutcome::TimedOut, Some(format!("exceeded {}s budget", budget.as_secs())))
        }
    };

    JobRecord {
        id,
        outcome,
        detail,
    }
}
