//! Retry logic with exponential backoff and jitter.

use std::time::Duration;

use tracing::warn;

use crate::http_client::{HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse};

/// Backoff strategy for retrying failed requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed {
        delay: Duration,
    },
    /// Uses an exponential delay between retries.
    ///
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_secs(4),
            factor: 2.0,
            max: Duration::from_secs(10),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let scale = factor.powi(attempt as i32);
                let seconds = base.as_secs_f64() * scale;
                let capped_seconds = seconds.min(max.as_secs_f64());

                let mut delay = Duration::from_secs_f64(capped_seconds);

                if jitter {
                    let jitter_ms = (delay.as_millis() as f64 * 0.5) as u64;
                    let random_offset = fastrand::u64(0..=(jitter_ms * 2));
                    let total_ms =
                        delay.as_millis() as i64 + (random_offset as i64 - jitter_ms as i64);
                    delay = Duration::from_millis(total_ms.max(0) as u64);
                }

                delay
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub enabled: bool,
    /// Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    pub backoff: Backoff,
    /// HTTP status codes that trigger a retry.
    pub retry_on_status: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 2,
            backoff: Backoff::default(),
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn exponential(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed { delay },
            ..Self::default()
        }
    }

    pub fn no_retry() -> Self {
        Self {
            enabled: false,
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }

    const fn attempts(&self) -> u32 {
        if self.enabled {
            self.max_retries + 1
        } else {
            1
        }
    }
}

/// Transport decorator that re-issues failed requests per [`RetryConfig`].
///
/// Retryable transport errors and statuses listed in
/// [`RetryConfig::retry_on_status`] are retried; the last outcome is returned
/// unchanged once attempts are exhausted.
#[derive(Debug, Clone)]
pub struct RetryingHttpClient<C> {
    inner: C,
    config: RetryConfig,
}

impl<C: HttpClient> RetryingHttpClient<C> {
    pub fn new(inner: C, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    fn should_retry(&self, outcome: &Result<HttpResponse, HttpError>) -> bool {
        match outcome {
            Ok(response) => self.config.should_retry_status(response.status),
            Err(error) => error.retryable(),
        }
    }
}

impl<C: HttpClient> HttpClient for RetryingHttpClient<C> {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        Box::pin(async move {
            let attempts = self.config.attempts();
            let mut attempt = 0;
            loop {
                let outcome = self.inner.execute(request.clone()).await;
                attempt += 1;
                if attempt >= attempts || !self.should_retry(&outcome) {
                    return outcome;
                }

                let delay = self.config.delay_for_attempt(attempt - 1);
                let reason = match &outcome {
                    Ok(response) => format!("status {}", response.status),
                    Err(error) => error.message().to_owned(),
                };
                warn!(
                    url = %request.url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying provider request after {reason}"
                );
                tokio::time::sleep(delay).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::StaticHttpClient;
    use std::sync::Arc;

    #[test]
    fn test_fixed_backoff() {
        let backoff = Backoff::Fixed {
            delay: Duration::from_millis(100),
        };

        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(10), Duration::from_millis(100));
    }

    #[test]
    fn test_exponential_backoff_is_capped() {
        let backoff = Backoff::Exponential {
            base: Duration::from_secs(4),
            factor: 2.0,
            max: Duration::from_secs(10),
            jitter: false,
        };

        assert_eq!(backoff.delay(0), Duration::from_secs(4));
        assert_eq!(backoff.delay(1), Duration::from_secs(8));
        assert_eq!(backoff.delay(2), Duration::from_secs(10));
    }

    #[test]
    fn test_exponential_backoff_with_jitter_stays_in_band() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            factor: 2.0,
            max: Duration::from_secs(1),
            jitter: true,
        };

        for _ in 0..10 {
            for attempt in 0..5 {
                let delay_ms = backoff.delay(attempt).as_millis() as f64;
                let expected = (100.0 * 2_f64.powi(attempt as i32)).min(1000.0);
                assert!(delay_ms >= expected * 0.49, "attempt={attempt}, delay_ms={delay_ms}");
                assert!(delay_ms <= expected * 1.51, "attempt={attempt}, delay_ms={delay_ms}");
            }
        }
    }

    #[test]
    fn test_default_retry_config_makes_three_attempts() {
        let config = RetryConfig::default();

        assert!(config.enabled);
        assert_eq!(config.attempts(), 3);
        assert!(config.should_retry_status(503));
        assert!(!config.should_retry_status(404));
        assert_eq!(RetryConfig::no_retry().attempts(), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let url = "https://example.test/stock/list";
        let inner = Arc::new(
            StaticHttpClient::new()
                .with_response(url, Err(HttpError::new("connection reset")))
                .with_response(url, Ok(HttpResponse::with_status(503, "busy")))
                .with_json(url, "[]"),
        );
        let client =
            RetryingHttpClient::new(Arc::clone(&inner), RetryConfig::fixed(Duration::ZERO, 2));

        let response = client
            .execute(HttpRequest::get(url))
            .await
            .expect("third attempt succeeds");

        assert_eq!(response.body, "[]");
        assert_eq!(inner.hits(url), 3);
    }

    #[tokio::test]
    async fn gives_up_after_bounded_attempts() {
        let url = "https://example.test/down";
        let inner = Arc::new(
            StaticHttpClient::new()
                .with_response(url, Ok(HttpResponse::with_status(502, "bad gateway"))),
        );
        let client =
            RetryingHttpClient::new(Arc::clone(&inner), RetryConfig::fixed(Duration::ZERO, 1));

        let response = client.execute(HttpRequest::get(url)).await.expect("status is returned");

        assert_eq!(response.status, 502);
        assert_eq!(inner.hits(url), 2);
    }

    #[tokio::test]
    async fn does_not_retry_non_retryable_errors() {
        let url = "https://example.test/bad";
        let inner = Arc::new(
            StaticHttpClient::new()
                .with_response(url, Err(HttpError::non_retryable("invalid url"))),
        );
        let client =
            RetryingHttpClient::new(Arc::clone(&inner), RetryConfig::fixed(Duration::ZERO, 3));

        assert!(client.execute(HttpRequest::get(url)).await.is_err());
        assert_eq!(inner.hits(url), 1);
    }
}
