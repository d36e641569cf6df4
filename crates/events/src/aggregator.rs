//! Device-level alert aggregation trigger boundary.
//!
//! The aggregation logic itself runs outside this service; Canopy only
//! signals "recompute the alert status of device X" after a sensor's
//! health transitions. [`WebhookAggregator`] delivers that signal over
//! HTTP with bounded exponential-backoff retry; [`NoopAggregator`] stands
//! in when no aggregator endpoint is configured.

use std::time::Duration;

use async_trait::async_trait;
use canopy_core::types::DbId;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for aggregator trigger delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Aggregator returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// AlertAggregator
// ---------------------------------------------------------------------------

/// Downstream process that recomputes a device-wide alert status from the
/// statuses of all sensors on that device.
#[async_trait]
pub trait AlertAggregator: Send + Sync {
    /// Ask the aggregator to recompute the alert status of one device.
    ///
    /// The signal carries nothing beyond the device identifier.
    async fn recompute_device(&self, device_id: DbId) -> Result<(), AggregatorError>;
}

// ---------------------------------------------------------------------------
// WebhookAggregator
// ---------------------------------------------------------------------------

/// Delivers aggregator triggers to an external webhook endpoint.
pub struct WebhookAggregator {
    client: reqwest::Client,
    url: String,
}

impl WebhookAggregator {
    /// Create a new trigger delivery service with a pre-configured HTTP
    /// client.
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            url: url.into(),
        }
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, payload: &serde_json::Value) -> Result<(), AggregatorError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(AggregatorError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl AlertAggregator for WebhookAggregator {
    /// Deliver the trigger with retry.
    ///
    /// Retries up to 3 times with exponential backoff before giving up.
    /// Returns `Ok(())` on the first successful attempt.
    async fn recompute_device(&self, device_id: DbId) -> Result<(), AggregatorError> {
        let payload = serde_json::json!({ "device_id": device_id });

        let mut last_err: Option<AggregatorError> = None;

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            match self.try_send(&payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url = %self.url,
                        device_id,
                        error = %e,
                        "Aggregator trigger attempt failed, retrying"
                    );
                    last_err = Some(e);
                    tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(&payload).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(
                    url = %self.url,
                    device_id,
                    error = %e,
                    "Aggregator trigger failed after all retries"
                );
                Err(last_err.unwrap_or(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// NoopAggregator
// ---------------------------------------------------------------------------

/// Aggregator that drops every trigger.
///
/// Used in tests and when no aggregator endpoint is configured.
#[derive(Debug, Default)]
pub struct NoopAggregator;

#[async_trait]
impl AlertAggregator for NoopAggregator {
    async fn recompute_device(&self, _device_id: DbId) -> Result<(), AggregatorError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _aggregator = WebhookAggregator::new("http://localhost:9/hook");
    }

    #[tokio::test]
    async fn noop_always_succeeds() {
        let aggregator = NoopAggregator;
        assert!(aggregator.recompute_device(1).await.is_ok());
    }

    #[test]
    fn aggregator_error_display_http_status() {
        let err = AggregatorError::HttpStatus(502);
        assert_eq!(err.to_string(), "Aggregator returned HTTP 502");
    }

    #[test]
    fn aggregator_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = AggregatorError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
