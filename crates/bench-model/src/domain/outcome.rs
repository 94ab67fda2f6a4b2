use serde::{Deserialize, Serialize};

/// Lifecycle state of one benchmark job.
///
/// `Pending` transitions to `Provisioned` or `ProvisionFailed`; a provisioned
/// job then settles as `Succeeded`, `Failed` or `TimedOut`. `ProvisionFailed`
/// and the three post-dispatch states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobOutcome {
    /// Job is resolved but no capacity has been requested yet.
    Pending,
    /// Capacity was acquired; execution has not settled.
    Provisioned,
    /// Capacity could not be created for this job.
    ProvisionFailed,
    /// The harness reported a successful run.
    Succeeded,
    /// The harness reported a non-success exit.
    Failed,
    /// The job exceeded its time budget.
    TimedOut,
}

impl JobOutcome {
    /// Returns `true` if the job will not transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobOutcome::ProvisionFailed
                | JobOutcome::Succeeded
                | JobOutcome::Failed
                | JobOutcome::TimedOut
        )
    }

    /// Returns `true` once the execution stage has produced a verdict.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            JobOutcome::Succeeded | JobOutcome::Failed | JobOutcome::TimedOut
        )
    }
}
