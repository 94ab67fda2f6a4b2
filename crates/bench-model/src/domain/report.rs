use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::JobRecord;

/// Overall terminal status of one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// Resolution produced zero jobs; nothing was provisioned or executed.
    EmptySelection,
    /// At least one provisioning call failed; no job reached execution.
    ProvisioningAborted,
    /// Every job provisioned and executed to a terminal outcome.
    Completed,
}

/// Deterministic summary of one run.
///
/// `jobs` preserves the resolved job-list order regardless of the completion
/// order of the underlying concurrent operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub jobs: Vec<JobRecord>,
}

impl RunReport {
    pub fn new(status: RunStatus, jobs: Vec<JobRecord>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            status,
            jobs,
        }
    }
}
