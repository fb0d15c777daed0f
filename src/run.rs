//! Run orchestration: version probe, trigger, then stream consumption.

use std::time::Duration;

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::client::events::RunOutcome;
use crate::client::trigger::TriggerRequest;
use crate::config::Config;
use crate::error::ClientError;
use crate::report::ReportSink;

/// Execute one full run against `client`, reporting through `sink`.
///
/// Exactly one failure message reaches the sink on any failing path; passing
/// runs never signal failure. Returns `true` when the run ended in a passing
/// state, intended to drive the process exit code.
pub async fn execute(client: &ApiClient, config: &Config, sink: &dyn ReportSink) -> bool {
    match run(client, config, sink).await {
        Ok(RunOutcome::Succeeded { status }) => {
            info!(status, "run finished successfully");
            true
        }
        Ok(RunOutcome::Failed { status }) => {
            sink.fail(&format!("Run finished with failing status: {status}"));
            false
        }
        Err(err) => {
            sink.fail(&err.to_string());
            false
        }
    }
}

async fn run(
    client: &ApiClient,
    config: &Config,
    sink: &dyn ReportSink,
) -> Result<RunOutcome, ClientError> {
    // Advisory telemetry only; a dead version endpoint never blocks the run.
    match client.fetch_version().await {
        Ok(version) => sink.report("version", &version),
        Err(err) => warn!(error = %err, "version probe failed, continuing"),
    }

    let request = TriggerRequest {
        suite_ids: config.selected_suites(),
        fail_fast: config.fail_fast,
    };
    let run_id = client.trigger_run(&request, config.max_retries).await?;
    sink.report("runId", &run_id);

    match config.deadline_secs {
        Some(secs) => tokio::time::timeout(
            Duration::from_secs(secs),
            client.wait_for_outcome(&run_id, sink),
        )
        .await
        .map_err(|_elapsed| ClientError::DeadlineExceeded(secs))?,
        None => client.wait_for_outcome(&run_id, sink).await,
    }
}
