//! Job-start request against the trigger endpoint.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::ClientError;
use crate::retry::retry_with_backoff;

use super::{API_KEY_HEADER, ApiClient};

/// Body of the trigger call. Built once per run.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerRequest {
    /// Suites to run, in caller order, duplicates preserved. Omitted from the
    /// body entirely when `None`, which asks the service for its default
    /// selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_ids: Option<Vec<String>>,

    /// Stop the remote run at the first failing test.
    pub fail_fast: bool,
}

/// Whether a trigger failure is worth another attempt: transport errors with
/// no HTTP response, and server-side rejections in the 5xx range. Rejections
/// in the 4xx range are permanent, as is a response without a run identifier.
pub fn is_transient(err: &ClientError) -> bool {
    match err {
        ClientError::Transport(e) => !e.is_decode(),
        ClientError::TriggerRejected { status, .. } => (500..600).contains(status),
        _ => false,
    }
}

impl ApiClient {
    /// Start a run, retrying transient failures up to `max_retries` times.
    /// Returns the opaque run identifier.
    pub async fn trigger_run(
        &self,
        request: &TriggerRequest,
        max_retries: u32,
    ) -> Result<String, ClientError> {
        let run_id =
            retry_with_backoff(max_retries, is_transient, || self.request_trigger(request))
                .await?;
        info!(run_id = %run_id, "run triggered");
        Ok(run_id)
    }

    async fn request_trigger(&self, request: &TriggerRequest) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(self.url("/external/actions/trigger"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::TriggerRejected {
                status: status.as_u16(),
                body,
            });
        }
        let body: Value = resp.json().await?;
        match body.get("run_id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(ClientError::MissingRunId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16) -> ClientError {
        ClientError::TriggerRejected {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn server_side_rejections_are_transient() {
        assert!(is_transient(&rejected(500)));
        assert!(is_transient(&rejected(503)));
        assert!(is_transient(&rejected(599)));
    }

    #[test]
    fn client_side_rejections_are_permanent() {
        assert!(!is_transient(&rejected(400)));
        assert!(!is_transient(&rejected(401)));
        assert!(!is_transient(&rejected(404)));
        assert!(!is_transient(&rejected(499)));
    }

    #[test]
    fn missing_run_id_is_permanent() {
        assert!(!is_transient(&ClientError::MissingRunId));
    }

    #[test]
    fn rejection_message_embeds_status_and_body() {
        let err = ClientError::TriggerRejected {
            status: 401,
            body: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to trigger action: 401 bad key");
    }

    #[test]
    fn suite_ids_are_omitted_when_absent() {
        let body = serde_json::to_value(TriggerRequest {
            suite_ids: None,
            fail_fast: true,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "fail_fast": true }));
    }

    #[test]
    fn suite_ids_keep_caller_order() {
        let body = serde_json::to_value(TriggerRequest {
            suite_ids: Some(vec!["s2".to_string(), "s1".to_string(), "s2".to_string()]),
            fail_fast: false,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "suite_ids": ["s2", "s1", "s2"], "fail_fast": false })
        );
    }
}
