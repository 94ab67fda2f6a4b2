use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use bench_model::{BenchmarkId, CapacityLease};

use crate::error::HarnessError;
use crate::harness::{ExecReport, Harness};
use crate::util::kill_graceful;

/// Subprocess configuration baked into the harness instance.
#[derive(Clone, Debug, Default)]
pub struct ProcHarnessConfig {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    /// Root of the durable result store; per-job references are derived
    /// from it and forwarded opaquely.
    pub result_root: Option<String>,
}

/// Runs the external benchmark harness as a child process.
///
/// The benchmark id and the leased runner id are appended to the configured
/// arguments, so one harness instance serves every job in the run.
#[derive(Debug)]
pub struct ProcHarness {
    cfg: ProcHarnessConfig,
}

impl ProcHarness {
    pub fn new(cfg: ProcHarnessConfig) -> Result<Self, HarnessError> {
        if cfg.program.is_empty() {
            return Err(HarnessError::MissingProgram);
        }
        Ok(Self { cfg })
    }
}

#[async_trait]
impl Harness for ProcHarness {
    async fn execute(
        &self,
        benchmark: &BenchmarkId,
        lease: &CapacityLease,
        cancel: CancellationToken,
    ) -> Result<ExecReport, HarnessError> {
        trace!(
            target: "bench.exec.proc",
            program = %self.cfg.program,
            %benchmark,
            runner = %lease.runner_id,
            "spawn"
        );

        let mut cmd = tokio::process::Command::new(&self.cfg.program);
        cmd.args(&self.cfg.args);
        cmd.arg(benchmark);
        cmd.arg(&lease.runner_id);

        if let Some(cwd) = &self.cfg.cwd {
            cmd.current_dir(cwd);
        }
        for (k, v) in &self.cfg.env {
            cmd.env(k, v);
        }

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit());

        let mut child = cmd
            .spawn()
            .map_err(|e| HarnessError::Spawn(e.to_string()))?;

        let mut out_lines = {
            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| HarnessError::Io("stdout not captured".to_string()))?;
            BufReader::new(stdout).lines()
        };

        let read_stdout = tokio::spawn(async move {
            while let Ok(Some(line)) = out_lines.next_line().await {
                trace!(target: "bench.exec.proc.out", %line);
            }
        });

        let output_ref = self
            .cfg
            .result_root
            .as_ref()
            .map(|root| format!("{root}/{benchmark}"));

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| HarnessError::Io(format!("wait: {e}")))?;
                let _ = read_stdout.await;

                match status.code() {
                    Some(0) => {
                        debug!(target: "bench.exec.proc", %benchmark, "exit success");
                        Ok(ExecReport { exit_code: Some(0), output_ref })
                    }
                    Some(code) => Err(HarnessError::NonZeroExit { code }),
                    None => Err(HarnessError::KilledBySignal),
                }
            }
            _ = cancel.cancelled() => {
                debug!(target: "bench.exec.proc", %benchmark, "cancelled; killing child");
                let _ = kill_graceful(&mut child).await;
                Err(HarnessError::Cancelled)
            }
        }
    }
}
