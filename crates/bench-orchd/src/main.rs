use std::env;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use bench_core::{Orchestrator, ResolveConfig};
use bench_exec::{ProcHarness, ProcHarnessConfig};
use bench_model::{RunStatus, SelectionRequest};
use bench_observe::{LoggerConfig, LoggerFormat, init_logger};

use bench_provision::{HttpCapacityClient, ProvisionConfig};

const DEFAULT_BUDGET_SECS: u64 = 3600;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let logger_cfg = LoggerConfig {
        format: env_or("BENCH_LOG_FORMAT", "text").parse::<LoggerFormat>()?,
        level: env_or("BENCH_LOG", "info"),
        ..Default::default()
    };
    init_logger(&logger_cfg)?;

    // 1) Selection request intake: malformed mode values are rejected here,
    //    before anything is provisioned.
    let request_path = env::args()
        .nth(1)
        .context("usage: bench-orchd <selection-request.json>")?;
    let raw = fs::read_to_string(&request_path)
        .with_context(|| format!("failed to read {request_path}"))?;
    let request: SelectionRequest =
        serde_json::from_str(&raw).context("malformed selection request")?;
    info!(mode = ?request.mode, flags = request.flags.len(), "selection request accepted");

    // 2) Provisioning endpoint configuration.
    let provision_cfg = ProvisionConfig {
        endpoint: env::var("BENCH_PROVISION_ENDPOINT")
            .context("BENCH_PROVISION_ENDPOINT is required")?,
        repository: env::var("BENCH_REPOSITORY").context("BENCH_REPOSITORY is required")?,
        size_class: env_or("BENCH_RUNNER_SIZE", "large"),
        credential: env::var("BENCH_CREDENTIAL").context("BENCH_CREDENTIAL is required")?,
    };

    // 3) Execution harness configuration.
    let harness_cfg = ProcHarnessConfig {
        program: env::var("BENCH_HARNESS").context("BENCH_HARNESS is required")?,
        args: split_list(&env_or("BENCH_HARNESS_ARGS", "")),
        env: Vec::new(),
        cwd: None,
        result_root: env::var("BENCH_RESULT_ROOT").ok(),
    };

    let resolve_cfg = ResolveConfig {
        default_benchmarks: split_list(&env_or("BENCH_DEFAULTS", "")),
        ..Default::default()
    };

    let budget_secs = env::var("BENCH_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_BUDGET_SECS);

    let orchestrator = Orchestrator::new(
        resolve_cfg,
        Arc::new(HttpCapacityClient::new(provision_cfg)),
        Arc::new(ProcHarness::new(harness_cfg)?),
        Duration::from_secs(budget_secs),
    );

    // 4) Run and report.
    let report = orchestrator.run(&request).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(match report.status {
        RunStatus::Completed => ExitCode::SUCCESS,
        RunStatus::EmptySelection => ExitCode::from(2),
        RunStatus::ProvisioningAborted => ExitCode::from(3),
    })
}

fn env_or(name: &str, fallback: &str) -> String {
    env::var(name).unwrap_or_else(|_| fallback.to_string())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list(" a, b ,,c "),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(split_list("").is_empty());
    }
}
