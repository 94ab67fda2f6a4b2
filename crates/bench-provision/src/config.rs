/// Connection settings for the capacity provisioning endpoint.
///
/// The credential is issued once per run and shared read-only by every
/// provisioning call; nothing in this crate mutates it.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Lambda-style endpoint that creates ephemeral runners.
    pub endpoint: String,
    /// Repository the runners are registered against.
    pub repository: String,
    /// Size class requested for every runner in the run.
    pub size_class: String,
    /// Short-lived registration credential, scoped to the whole run.
    pub credential: String,
}
