//! Typed failure taxonomy for the client.

use thiserror::Error;

/// Everything that can go wrong while triggering and watching a run.
///
/// The Display strings of the trigger-rejection and stream variants are an
/// observable contract: hosts pattern-match on them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure with no usable HTTP response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The trigger endpoint answered outside the 2xx range.
    #[error("Failed to trigger action: {status} {body}")]
    TriggerRejected { status: u16, body: String },

    /// The trigger response parsed, but carried no usable run identifier.
    #[error("no run_id received from the trigger response")]
    MissingRunId,

    /// The events endpoint refused the streaming connection.
    #[error("Failed to connect to SSE endpoint: {status}")]
    StreamRejected { status: u16 },

    /// Any failure inside the streaming phase, connect rejections included.
    #[error("SSE connection error: {message}")]
    StreamFailed { message: String },

    /// The version endpoint answered outside the 2xx range.
    #[error("version endpoint returned status {status}")]
    VersionRejected { status: u16 },

    /// The configured streaming deadline elapsed without a terminal status.
    #[error("no terminal run status within {0}s")]
    DeadlineExceeded(u64),
}
