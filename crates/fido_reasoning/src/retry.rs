//! Bounded retry with exponential backoff for provider HTTP calls.
//!
//! Transient failures (429, 5xx, 408, network errors) are retried; client
//! errors fail immediately. This sits below the engine's no-retry policy:
//! a completion that *parses badly* is never re-asked, only transport-level
//! failures are.

use anyhow::Result;
use reqwest::{Response, StatusCode};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(20),
        }
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

/// Run `send` until it yields a success response, a non-transient error, or
/// the attempt budget runs out.
pub async fn send_with_retry<F, Fut>(
    policy: &RetryPolicy,
    provider: &str,
    send: F,
) -> Result<Response>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<Response>>,
{
    let mut delay = policy.initial_delay;
    let mut last_error = String::from("no attempts made");

    for attempt in 1..=policy.max_attempts {
        match send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    if attempt > 1 {
                        tracing::info!("{} succeeded on attempt {}", provider, attempt);
                    }
                    return Ok(response);
                }
                let body = response.text().await.unwrap_or_default();
                if !is_transient(status) {
                    anyhow::bail!("{} API error ({}): {}", provider, status, body);
                }
                tracing::warn!(
                    "{} returned {} on attempt {}/{}",
                    provider,
                    status,
                    attempt,
                    policy.max_attempts
                );
                last_error = format!("{} ({})", status, body.chars().take(200).collect::<String>());
            }
            Err(e) => {
                tracing::warn!(
                    "{} network error on attempt {}/{}: {}",
                    provider,
                    attempt,
                    policy.max_attempts,
                    e
                );
                last_error = e.to_string();
            }
        }

        if attempt < policy.max_attempts {
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(policy.max_delay);
        }
    }

    anyhow::bail!(
        "{} failed after {} attempts, last error: {}",
        provider,
        policy.max_attempts,
        last_error
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient(StatusCode::BAD_GATEWAY));
        assert!(is_transient(StatusCode::REQUEST_TIMEOUT));
        assert!(!is_transient(StatusCode::UNAUTHORIZED));
        assert!(!is_transient(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_exhausts_attempts_on_network_errors() {
        let policy = RetryPolicy {
            max_attempts: 2,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        };
        let result = send_with_retry(&policy, "test", || async {
            Err(anyhow::anyhow!("connection refused"))
        })
        .await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("after 2 attempts"));
        assert!(err.contains("connection refused"));
    }
}
