use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bench_model::{BenchmarkId, CapacityLease};

use crate::{ProvisionConfig, ProvisionError};

/// Capability seam for acquiring one unit of ephemeral compute.
///
/// Implementations send exactly one provisioning request per invocation and
/// never retry; a failed attempt is final for that job.
#[async_trait]
pub trait CapacityClient: Send + Sync {
    /// Requests exactly one runner dedicated to the given benchmark.
    async fn provision(&self, benchmark: &BenchmarkId) -> Result<CapacityLease, ProvisionError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRunnerRequest<'a> {
    credential: &'a str,
    count: u32,
    size_class: &'a str,
    repository: &'a str,
    /// Carries the benchmark id so the lease-to-job mapping stays 1:1.
    label: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRunnerResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    runner_id: Option<String>,
}

/// HTTP client for the lambda-style runner provisioning endpoint.
pub struct HttpCapacityClient {
    cfg: ProvisionConfig,
    http: reqwest::Client,
}

impl HttpCapacityClient {
    pub fn new(cfg: ProvisionConfig) -> Self {
        Self {
            cfg,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CapacityClient for HttpCapacityClient {
    async fn provision(&self, benchmark: &BenchmarkId) -> Result<CapacityLease, ProvisionError> {
        // count is fixed at 1 even though the endpoint accepts more:
        // every lease must belong to exactly one job.
        let request = CreateRunnerRequest {
            credential: &self.cfg.credential,
            count: 1,
            size_class: &self.cfg.size_class,
            repository: &self.cfg.repository,
            label: benchmark,
        };

        debug!(target: "bench.provision", %benchmark, repository = %self.cfg.repository, "requesting runner");

        let response = self
            .http
            .post(&self.cfg.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProvisionError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CreateRunnerResponse = serde_json::from_str(&body).map_err(|e| {
            ProvisionError::InvalidResponse(format!("failed to parse response: {e}, body: {body}"))
        })?;

        validate_response(parsed, &self.cfg.size_class)
    }
}

/// Anything short of an explicit success carrying a runner id is a failure.
fn validate_response(
    response: CreateRunnerResponse,
    size_class: &str,
) -> Result<CapacityLease, ProvisionError> {
    if !response.success {
        return Err(ProvisionError::Rejected(response.message));
    }

    let runner_id = response
        .runner_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ProvisionError::InvalidResponse("success response without runner id".to_string())
        })?;

    Ok(CapacityLease {
        runner_id,
        size_class: size_class.to_string(),
    })
}
