//! Opt-in retry of idempotent requests with linear backoff.

use super::error::{ApiError, ApiErrorKind};
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
        }
    }
}

/// `attempts_done` counts the retries already issued.
pub fn should_retry(error: &ApiError, attempts_done: u32, policy: &RetryPolicy) -> bool {
    if attempts_done >= policy.max_retries {
        return false;
    }
    !matches!(
        error.kind(),
        ApiErrorKind::Unauthorized | ApiErrorKind::Forbidden | ApiErrorKind::Validation
    )
}

/// Delay before retry number `attempt` (1-based)
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> u32 {
    policy.base_delay_ms.saturating_mul(attempt)
}

pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempts = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if should_retry(&e, attempts, &policy) => {
                attempts += 1;
                let delay = backoff_delay(&policy, attempts);
                log::warn!(
                    "Request failed ({}), retry {}/{} in {} ms",
                    e,
                    attempts,
                    policy.max_retries,
                    delay
                );
                gloo_timers::future::TimeoutFuture::new(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_retries_auth_and_validation() {
        let policy = RetryPolicy::default();
        for status in [401, 403, 422] {
            assert!(!should_retry(&ApiError::from_response(status, None), 0, &policy));
        }
    }

    #[test]
    fn test_retries_server_and_network_until_limit() {
        let policy = RetryPolicy { max_retries: 2, base_delay_ms: 100 };
        let server = ApiError::from_response(502, None);
        let network = ApiError::network("offline");

        assert!(should_retry(&server, 0, &policy));
        assert!(should_retry(&network, 1, &policy));
        assert!(!should_retry(&network, 2, &policy));
    }

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy { max_retries: 3, base_delay_ms: 250 };
        assert_eq!(backoff_delay(&policy, 1), 250);
        assert_eq!(backoff_delay(&policy, 2), 500);
        assert_eq!(backoff_delay(&policy, 3), 750);
    }
}
