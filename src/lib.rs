//! runwatch
//!
//! A resilient trigger-and-stream client: it starts a remote asynchronous
//! test-suite run over HTTP, then consumes the run's Server-Sent-Events
//! stream until a terminal status arrives, retrying transient failures with
//! exponential backoff along the way.
//!
//! # Architecture
//!
//! - **Client**: one `reqwest`-backed [`client::ApiClient`] for the version,
//!   trigger and event-stream endpoints
//! - **Retry**: generic backoff wrapper with an injected retryability
//!   predicate
//! - **Reporting**: key/value outputs and the single terminal failure signal
//!   flow through an explicit [`report::ReportSink`], never ambient state
//!
//! # Modules
//!
//! - [`client`]: HTTP client for the three service endpoints
//! - [`config`]: CLI / environment configuration
//! - [`error`]: typed failure taxonomy
//! - [`report`]: host-facing report sink boundary
//! - [`retry`]: retry-with-exponential-backoff wrapper
//! - [`run`]: orchestration of one full run

pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod retry;
pub mod run;
