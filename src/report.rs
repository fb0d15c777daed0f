//! Host-facing reporting boundary.
//!
//! The core never talks to its host directly: it publishes key/value outputs
//! and at most one terminal failure message through a [`ReportSink`] handed
//! in explicitly. [`LogSink`] is the production implementation; [`MemorySink`]
//! records everything for assertions in tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, info};

/// Where run outputs and the terminal failure signal go.
pub trait ReportSink: Send + Sync {
    /// Publish one key/value output of the run.
    fn report(&self, key: &str, value: &str);

    /// Signal the single terminal failure of the run.
    fn fail(&self, message: &str);
}

/// Writes outputs as `key=value` lines on stdout and mirrors them to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&self, key: &str, value: &str) {
        info!(key, value, "run output");
        println!("{key}={value}");
    }

    fn fail(&self, message: &str) {
        error!(failure = %message, "run failed");
        eprintln!("{message}");
    }
}

/// Recording sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    outputs: Mutex<Vec<(String, String)>>,
    failures: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Last reported value for `key`, if any.
    pub fn output(&self, key: &str) -> Option<String> {
        lock(&self.outputs)
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Every `(key, value)` pair in report order.
    pub fn outputs(&self) -> Vec<(String, String)> {
        lock(&self.outputs).clone()
    }

    /// Every failure message in signal order.
    pub fn failures(&self) -> Vec<String> {
        lock(&self.failures).clone()
    }
}

impl ReportSink for MemorySink {
    fn report(&self, key: &str, value: &str) {
        lock(&self.outputs).push((key.to_string(), value.to_string()));
    }

    fn fail(&self, message: &str) {
        lock(&self.failures).push(message.to_string());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
