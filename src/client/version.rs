//! Best-effort probe of the service version endpoint.

use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;
use crate::retry::retry_with_backoff;

use super::ApiClient;

/// Retry budget for the probe; every failure is considered transient.
const PROBE_RETRIES: u32 = 3;

impl ApiClient {
    /// Fetch the service version string. Advisory only: callers are expected
    /// to tolerate failure.
    pub async fn fetch_version(&self) -> Result<String, ClientError> {
        retry_with_backoff(PROBE_RETRIES, |_| true, || self.request_version()).await
    }

    async fn request_version(&self) -> Result<String, ClientError> {
        let resp = self.http.get(self.url("/version")).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::VersionRejected {
                status: status.as_u16(),
            });
        }
        let body: Value = resp.json().await?;
        let version = body.get("version").and_then(Value::as_str).unwrap_or("unknown");
        debug!(version, "version probe succeeded");
        Ok(version.to_string())
    }
}
