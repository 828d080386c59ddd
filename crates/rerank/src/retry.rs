//! Retry logic with exponential backoff for provider calls.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try.
    pub max_retries: u32,
    /// Base for exponential backoff, in milliseconds.
    #[serde(with = "crate::serde_millis")]
    pub base_delay: Duration,
    /// Backoff ceiling, in milliseconds.
    #[serde(with = "crate::serde_millis")]
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Spread delays by ±25%.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay before retry `attempt` (0 means the first try, which never waits).
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponential =
            self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi((attempt - 1) as i32);
        let delay_ms = exponential.min(self.max_delay.as_millis() as f64) as u64;

        if self.jitter {
            let spread = delay_ms / 4;
            if spread > 0 {
                let offset = fastrand::u64(0..spread * 2);
                return Duration::from_millis(delay_ms.saturating_sub(spread) + offset);
            }
        }

        Duration::from_millis(delay_ms)
    }
}

/// Outcome of a single attempt that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// Worth trying again.
    Transient(String),
    /// Stop immediately.
    Fatal(String),
}

impl AttemptError {
    fn into_message(self) -> String {
        match self {
            AttemptError::Transient(m) | AttemptError::Fatal(m) => m,
        }
    }
}

/// Result of a retried operation.
#[derive(Debug, Clone)]
pub struct RetryResult<T> {
    pub result: Result<T, String>,
    /// 1 means the first try settled it.
    pub attempts: u32,
    pub total_duration: Duration,
}

impl<T> RetryResult<T> {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, String> {
        self.result
    }
}

/// Whether an HTTP status is worth retrying: 429 and any 5xx.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Runs `operation` until it succeeds, fails fatally, or retries run out.
pub async fn execute_with_retry_async<T, F, Fut>(config: &RetryConfig, mut operation: F) -> RetryResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, AttemptError>>,
{
    let start = std::time::Instant::now();
    let mut last_error = String::from("all retries exhausted");

    for attempt in 0..=config.max_retries {
        match operation(attempt).await {
            Ok(value) => {
                return RetryResult {
                    result: Ok(value),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
            Err(AttemptError::Fatal(message)) => {
                return RetryResult {
                    result: Err(message),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
            Err(err) => {
                last_error = err.into_message();
                if attempt < config.max_retries {
                    let delay = config.calculate_delay(attempt + 1);
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
            }
        }
    }

    RetryResult {
        result: Err(last_error),
        attempts: config.max_retries + 1,
        total_duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig::default()
            .with_base_delay(Duration::from_millis(1))
            .with_jitter(false)
    }

    #[test]
    fn no_delay_on_first_attempt() {
        assert_eq!(RetryConfig::default().calculate_delay(0), Duration::ZERO);
    }

    #[test]
    fn exponential_delay() {
        let config = RetryConfig::default()
            .with_base_delay(Duration::from_millis(100))
            .with_backoff_multiplier(2.0)
            .with_jitter(false);
        assert_eq!(config.calculate_delay(1), Duration::from_millis(100));
        assert_eq!(config.calculate_delay(2), Duration::from_millis(200));
        assert_eq!(config.calculate_delay(3), Duration::from_millis(400));
    }

    #[test]
    fn delay_respects_max() {
        let config = RetryConfig::default()
            .with_base_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_millis(500))
            .with_jitter(false);
        assert_eq!(config.calculate_delay(4), Duration::from_millis(500));
    }

    #[test]
    fn jittered_delay_within_quarter() {
        let config = RetryConfig::default().with_base_delay(Duration::from_millis(400));
        for _ in 0..100 {
            let d = config.calculate_delay(1).as_millis();
            assert!((300..500).contains(&d), "delay {d}ms");
        }
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        for status in [400, 401, 403, 404, 422] {
            assert!(!is_retryable_status(status), "{status} retried");
        }
    }

    #[test]
    fn serde_uses_millis() {
        let json = serde_json::to_value(RetryConfig::default()).unwrap();
        assert_eq!(json["base_delay"], 200);
        assert_eq!(json["max_delay"], 5000);
    }

    #[tokio::test]
    async fn succeeds_first_try() {
        let result = execute_with_retry_async(&fast(), |_| async { Ok::<_, AttemptError>(7) }).await;
        assert!(result.succeeded());
        assert_eq!(result.attempts, 1);
        assert_eq!(result.into_result().unwrap(), 7);
    }

    #[tokio::test]
    async fn eventual_success() {
        let calls = AtomicU32::new(0);
        let result = execute_with_retry_async(&fast().with_max_retries(3), |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(AttemptError::Transient("connection reset".into()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;
        assert!(result.succeeded());
        assert_eq!(result.attempts, 3);
    }

    #[tokio::test]
    async fn exhaustion_reports_last_error() {
        let result: RetryResult<()> = execute_with_retry_async(&fast().with_max_retries(2), |attempt| async move {
            Err(AttemptError::Transient(format!("503 on attempt {attempt}")))
        })
        .await;
        assert!(!result.succeeded());
        assert_eq!(result.attempts, 3);
        assert_eq!(result.into_result().unwrap_err(), "503 on attempt 2");
    }

    #[tokio::test]
    async fn fatal_error_stops_immediately() {
        let calls = AtomicU32::new(0);
        let result: RetryResult<()> = execute_with_retry_async(&fast().with_max_retries(5), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Fatal("HTTP error 401 Unauthorized".into())) }
        })
        .await;
        assert_eq!(result.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
