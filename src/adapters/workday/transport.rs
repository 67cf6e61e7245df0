//! HTTP transport for XML endpoints
//!
//! [`Transport`] issues the raw requests the fetch engine and RAAS report
//! services build: an XML envelope POSTed to a web-services endpoint, or a
//! bare GET against a report URL. Responses come back as body text for the
//! XML layer to parse.
//!
//! Retry policy: only 5xx responses are transient. They are retried through
//! [`with_retry`] with a fixed attempt bound and fixed delay; every other
//! failure propagates immediately and aborts the current call.

use crate::config::RetryConfig;
use crate::domain::{AbacusError, Result, WorkdayError};
use std::future::Future;
use std::time::Duration;

/// Retry `operation` on transient server errors
///
/// Runs `operation` up to `max_attempts` times, sleeping `delay_ms`
/// between attempts. Only [`WorkdayError::ServerError`] is considered
/// transient; any other error is returned immediately. The delay is fixed,
/// not exponential.
pub async fn with_retry<F, Fut, T>(max_attempts: usize, delay_ms: u64, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let transient =
                    matches!(e, AbacusError::Workday(WorkdayError::ServerError { .. }));
                attempt += 1;
                if !transient || attempt >= max_attempts {
                    return Err(e);
                }

                tracing::warn!(
                    attempt = attempt,
                    max_attempts = max_attempts,
                    delay_ms = delay_ms,
                    error = %e,
                    "Retrying request after server error"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Blocking-style XML transport over one bearer token
///
/// Calls are awaited to completion one at a time; the transport never has
/// two requests in flight.
#[derive(Clone)]
pub struct Transport {
    client: reqwest::Client,
    token: String,
    retry: RetryConfig,
}

impl Transport {
    /// Create a transport with the given bearer token and retry policy
    pub fn new(token: impl Into<String>, timeout_seconds: u64, retry: RetryConfig) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AbacusError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            token: token.into(),
            retry,
        })
    }

    /// POST an XML envelope and return the response body
    pub async fn post_xml(&self, url: &str, payload: &str) -> Result<String> {
        with_retry(self.retry.max_attempts, self.retry.delay_ms, || async {
            let response = self
                .client
                .post(url)
                .header("Content-Type", "application/xml")
                .header("Authorization", format!("Bearer {}", self.token))
                .body(payload.to_string())
                .send()
                .await
                .map_err(map_send_error)?;

            Self::read_body(response).await
        })
        .await
    }

    /// GET a report URL and return the response body
    pub async fn get_xml(&self, url: &str) -> Result<String> {
        with_retry(self.retry.max_attempts, self.retry.delay_ms, || async {
            let response = self
                .client
                .get(url)
                .header("Content-Type", "application/xml")
                .header("Authorization", format!("Bearer {}", self.token))
                .send()
                .await
                .map_err(map_send_error)?;

            Self::read_body(response).await
        })
        .await
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(AbacusError::Workday(WorkdayError::ServerError {
                status: status.as_u16(),
                message: body,
            }));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AbacusError::Workday(WorkdayError::ClientError {
                status: status.as_u16(),
                message: body,
            }));
        }

        response
            .text()
            .await
            .map_err(|e| AbacusError::Workday(WorkdayError::InvalidResponse(e.to_string())))
    }
}

fn map_send_error(e: reqwest::Error) -> AbacusError {
    if e.is_timeout() {
        AbacusError::Workday(WorkdayError::Timeout(e.to_string()))
    } else {
        AbacusError::Workday(WorkdayError::ConnectionFailed(e.to_string()))
    }
}
