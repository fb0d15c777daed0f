//! Retry-with-exponential-backoff for fallible async operations.

use std::time::Duration;

use tracing::info;

/// Run `operation` up to `max_retries + 1` times.
///
/// A failure is retried only while attempts remain and `retryable` says so;
/// otherwise it propagates immediately. The wait before retry `i` (0-indexed)
/// is `2^i` seconds: 1s, 2s, 4s, ... with no jitter and no cap beyond what
/// `max_retries` implies.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    max_retries: u32,
    retryable: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= max_retries || !retryable(&err) {
                    return Err(err);
                }
                let delay = Duration::from_secs(2u64.saturating_pow(attempt));
                info!(
                    attempt = attempt + 1,
                    max_retries,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
