//! Bounded retry for transient faults.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

/// Run `operation` until it succeeds or `max_tries` attempts are spent, with
/// a fixed wait between attempts. The operation always runs at least once;
/// the final error propagates unchanged.
///
/// Intended for store-level transient faults (throttling, connection blips).
/// The coordinator paths do not retry; the poll loop and the engine's own
/// event redelivery cover them.
pub async fn retry<T, E, F, Fut>(max_tries: u32, wait: Duration, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut tries = 0u32;
    loop {
        tries += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if tries < max_tries => {
                warn!(
                    error = %err,
                    tries,
                    wait_ms = wait.as_millis() as u64,
                    "operation failed, waiting before next try"
                );
                sleep(wait).await;
            }
            Err(err) => return Err(err),
        }
    }
}
