//! Retry helper for HTTP requests with exponential backoff.
//!
//! Requests that fail with a throttling (429) or transient gateway status
//! (502/503/504) are retried with exponential backoff. Any other non-2xx
//! response is converted into `ClientError::ApiError`, parsing the
//! Kubernetes `Status` body when present.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::Status;

/// Sends an HTTP request, retrying throttled and transiently failing responses.
///
/// Backoff is `2^attempt` seconds between attempts. `max_retries = 0`
/// means a single attempt.
///
/// # Errors
///
/// - `ClientError::MaxRetriesExceeded` when the request stays throttled.
/// - `ClientError::ApiError` for any other non-success status.
/// - `ClientError::HttpError` for transport failures.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    resource: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None if attempt == 0 => {
                debug!("Request builder cannot be cloned, single attempt only");
                let response = builder.send().await?;
                return into_result(response).await;
            }
            None => return Err(ClientError::MaxRetriesExceeded(attempt)),
        };

        if let Some(m) = metrics {
            m.record_request(resource, method);
            if attempt > 0 {
                m.record_retry(resource, method, attempt);
            }
        }

        let started = Instant::now();
        let response = match attempt_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ClientError::from(e);
                if let Some(m) = metrics {
                    m.record_request_duration(resource, method, started.elapsed(), None);
                    m.record_client_error(resource, method, &err);
                }
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        if let Some(m) = metrics {
            m.record_request_duration(resource, method, started.elapsed(), Some(status));
        }

        if ClientError::is_retryable_status(status) {
            if attempt < max_retries {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    resource,
                    status,
                    attempt = attempt + 1,
                    max_attempts = max_retries + 1,
                    backoff_secs,
                    "Retryable response, backing off"
                );
                tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                continue;
            }
            if status == 429 {
                debug!(resource, attempts = attempt + 1, "Max retries exhausted while throttled");
                let err = ClientError::MaxRetriesExceeded(max_retries + 1);
                if let Some(m) = metrics {
                    m.record_client_error(resource, method, &err);
                }
                return Err(err);
            }
        }

        if attempt > 0 && response.status().is_success() {
            debug!(resource, attempt = attempt + 1, "Request succeeded after retry");
        }

        let result = into_result(response).await;
        if let (Err(err), Some(m)) = (&result, metrics) {
            m.record_client_error(resource, method, err);
        }
        return result;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Pass a successful response through; convert anything else into an `ApiError`.
async fn into_result(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let (reason, message) = match serde_json::from_str::<Status>(&body) {
        Ok(parsed) if parsed.message.is_some() || parsed.reason.is_some() => {
            let message = parsed
                .message
                .clone()
                .or_else(|| parsed.reason.clone())
                .unwrap_or_default();
            (parsed.reason, message)
        }
        _ => (None, body),
    };

    Err(ClientError::ApiError {
        status,
        url,
        reason,
        message,
    })
}
