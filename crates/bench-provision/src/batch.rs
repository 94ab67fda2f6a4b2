use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use bench_model::{BenchmarkId, CapacityLease, JobList};

use crate::{CapacityClient, ProvisionError};

/// The provisioning batch failed as a whole.
///
/// Carries every individual failure; leases acquired by sibling jobs have
/// already been discarded and cannot escape through this error.
#[derive(Debug, Error)]
#[error("provisioning aborted: {} of {attempted} runner requests failed", .failures.len())]
pub struct ProvisioningAborted {
    pub attempted: usize,
    pub failures: Vec<(BenchmarkId, ProvisionError)>,
}

/// Requests one runner per job, concurrently, preserving job-list order.
///
/// Fail-fast across the batch: a single failure aborts the run before the
/// execution stage. In-flight sibling calls are allowed to finish; their
/// leases are dropped here because a partially provisioned run must never
/// execute a subset of its benchmarks.
pub async fn provision_all<C>(
    jobs: &JobList,
    client: &C,
) -> Result<Vec<(BenchmarkId, CapacityLease)>, ProvisioningAborted>
where
    C: CapacityClient + ?Sized,
{
    let calls = jobs.iter().map(|id| async move {
        let result = client.provision(id).await;
        (id.clone(), result)
    });

    // join_all keeps results in submission order regardless of completion order.
    let results = join_all(calls).await;

    let mut leases = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (id, result) in results {
        match result {
            Ok(lease) => leases.push((id, lease)),
            Err(e) => {
                warn!(target: "bench.provision", benchmark = %id, error = %e, "runner request failed");
                failures.push((id, e));
            }
        }
    }

    if !failures.is_empty() {
        if !leases.is_empty() {
            warn!(
                target: "bench.provision",
                discarded = leases.len(),
                "discarding sibling leases after batch failure"
            );
        }
        return Err(ProvisioningAborted {
            attempted: jobs.len(),
            failures,
        });
    }

    info!(target: "bench.provision", runners = leases.len(), "all runners provisioned");
    Ok(leases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Client double that fails for a scripted set of benchmarks.
    struct ScriptedClient {
        failing: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(failing: Vec<&'static str>) -> Self {
            Self {
                failing,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CapacityClient for ScriptedClient {
        async fn provision(&self, benchmark: &BenchmarkId) -> Result<CapacityLease, ProvisionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.iter().any(|f| f == benchmark) {
                return Err(ProvisionError::Rejected("no capacity".to_string()));
            }
            Ok(CapacityLease {
                runner_id: format!("runner-{benchmark}"),
                size_class: "large".to_string(),
            })
        }
    }

    fn jobs(ids: &[&str]) -> JobList {
        JobList::new(ids.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[tokio::test]
    async fn all_success_preserves_order() {
        let client = ScriptedClient::new(vec![]);
        let leased = provision_all(&jobs(&["c", "a", "b"]), &client).await.unwrap();

        let ids: Vec<&str> = leased.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(leased[0].1.runner_id, "runner-c");
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn one_failure_aborts_the_batch() {
        let client = ScriptedClient::new(vec!["b"]);
        let err = provision_all(&jobs(&["a", "b", "c"]), &client)
            .await
            .unwrap_err();

        assert_eq!(err.attempted, 3);
        assert_eq!(err.failures.len(), 1);
        assert_eq!(err.failures[0].0, "b");
        // Every job was still attempted; siblings were not cancelled.
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn every_failure_is_reported() {
        let client = ScriptedClient::new(vec!["a", "c"]);
        let err = provision_all(&jobs(&["a", "b", "c"]), &client)
            .await
            .unwrap_err();

        let failed: Vec<&str> = err.failures.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(failed, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn single_job_batch() {
        let client = ScriptedClient::new(vec![]);
        let leased = provision_all(&jobs(&["solo"]), &client).await.unwrap();
        assert_eq!(leased.len(), 1);
    }
}
