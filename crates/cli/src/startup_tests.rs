use std::cell::Cell;

use super::*;

fn policy(max_attempts: u32) -> StartupRetry {
    StartupRetry {
        max_attempts,
        delay: Duration::from_millis(1),
    }
}

#[tokio::test]
async fn test_first_success_returns_immediately() {
    let calls = Cell::new(0);
    let result: Result<&str, String> = connect_with_retry(policy(10), |_| {
        calls.set(calls.get() + 1);
        async { Ok("connected") }
    })
    .await;

    assert_eq!(result, Ok("connected"));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_retries_until_success() {
    let result: Result<u32, String> = connect_with_retry(policy(10), |attempt| async move {
        if attempt < 4 {
            Err(format!("refused on attempt {attempt}"))
        } else {
            Ok(attempt)
        }
    })
    .await;

    assert_eq!(result, Ok(4));
}

#[tokio::test]
async fn test_gives_up_after_max_attempts_with_last_error() {
    let calls = Cell::new(0);
    let result: Result<(), String> = connect_with_retry(policy(3), |attempt| {
        calls.set(calls.get() + 1);
        async move { Err(format!("refused on attempt {attempt}")) }
    })
    .await;

    assert_eq!(result, Err("refused on attempt 3".to_string()));
    assert_eq!(calls.get(), 3);
}

#[tokio::test]
async fn test_zero_attempts_still_tries_once() {
    let calls = Cell::new(0);
    let result: Result<(), String> = connect_with_retry(policy(0), |_| {
        calls.set(calls.get() + 1);
        async { Err("refused".to_string()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_waits_between_attempts() {
    let started = tokio::time::Instant::now();
    let retry = StartupRetry {
        max_attempts: 3,
        delay: Duration::from_millis(20),
    };
    let _: Result<(), String> =
        connect_with_retry(retry, |_| async { Err("refused".to_string()) }).await;

    // Two delays between three attempts.
    assert!(started.elapsed() >= Duration::from_millis(40));
}
