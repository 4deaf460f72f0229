//! Bounded retry for the startup broker connection.
//!
//! The broker is often still starting when the bridge starts (both are
//! deployed together), so the first connection is retried a fixed number of
//! times with a fixed delay. This is the only retry loop in the service; once
//! connected, publish failures are never retried.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

/// How many times to try connecting, and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupRetry {
    /// Total number of attempts, including the first. Treated as 1 if zero.
    pub max_attempts: u32,
    /// Delay between a failed attempt and the next one.
    pub delay: Duration,
}

/// Calls `connect` until it succeeds or `policy.max_attempts` attempts have
/// failed, sleeping `policy.delay` between attempts.
///
/// `connect` receives the 1-based attempt number. The error of the last
/// attempt is returned when the budget is exhausted.
pub async fn connect_with_retry<T, E, F, Fut>(policy: StartupRetry, mut connect: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match connect(attempt).await {
            Ok(value) => {
                info!(attempt, "Broker connection established");
                return Ok(value);
            }
            Err(err) if attempt < max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "Broker connection failed; retrying in {:?}",
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => {
                error!(attempt, max_attempts, error = %err, "Broker connection failed; giving up");
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
