/// Handle to one unit of ephemeral compute.
///
/// Owned exclusively by the job it was provisioned for; deliberately not
/// `Clone`, so a lease cannot be shared across jobs. Releasing the underlying
/// runner is the provisioning service's lifecycle, not ours.
#[derive(Debug, PartialEq, Eq)]
pub struct CapacityLease {
    /// Identifier assigned by the provisioning endpoint.
    pub runner_id: String,
    /// Size class the runner was created with.
    pub size_class: String,
}
