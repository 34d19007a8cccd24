use crate::errors::RidderError;
use crate::models::ErrorResponse;
use reqwest::{header::CONTENT_TYPE, Method};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const API_KEY_HEADER: &str = "X-ApiKey";
const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// What was sent, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
}

/// What came back, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
    pub body: String,
}

/// One request and its response, if the server answered at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub request: RequestSummary,
    pub response: Option<ResponseSummary>,
}

/// reqwest-backed transport for the Ridder API.
///
/// Adds the API key header, counts requests and retries connection failures.
/// The counter uses relaxed atomics, so counts are approximate when one
/// transport is shared between tasks.
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
    max_retries: u32,
    retry_delay: Duration,
    request_count: AtomicU64,
}

impl HttpTransport {
    /// Creates a new `HttpTransport`.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Value sent in the `X-ApiKey` header.
    /// * `max_retries` - Extra attempts after a connection/timeout failure.
    /// * `seconds_between_retries` - Pause between attempts.
    /// * `timeout_seconds` - Per-request timeout, 30s when unset.
    pub fn new(
        api_key: String,
        max_retries: Option<u32>,
        seconds_between_retries: Option<u32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, RidderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(
                timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ))
            .build()?;

        Ok(Self {
            client,
            api_key,
            max_retries: max_retries.unwrap_or(0),
            retry_delay: Duration::from_secs(u64::from(seconds_between_retries.unwrap_or(0))),
            request_count: AtomicU64::new(0),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn reset_request_count(&self) {
        self.request_count.store(0, Ordering::Relaxed);
    }

    /// Sends one request and returns the exchange alongside the raw body of a
    /// successful response.
    ///
    /// A non-success status is turned into `RidderError::RemoteError`; the
    /// exchange is returned in every case so callers can attach it to
    /// diagnostics.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> (Exchange, Result<String, RidderError>) {
        let request = RequestSummary {
            method: method.to_string(),
            url: url.to_string(),
            body: body.clone(),
        };

        let mut attempt: u32 = 0;
        loop {
            self.request_count.fetch_add(1, Ordering::Relaxed);

            let mut builder = self
                .client
                .request(method.clone(), url)
                .header(API_KEY_HEADER, &self.api_key);
            if let Some(ref payload) = body {
                builder = builder
                    .header(CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
                    .body(payload.clone());
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(e) => {
                    let err = RidderError::from(e);
                    if err.is_retryable() && attempt < self.max_retries {
                        attempt += 1;
                        tracing::warn!(
                            "Ridder request {} {} failed ({}), retry {}/{}",
                            method,
                            url,
                            err,
                            attempt,
                            self.max_retries
                        );
                        tokio::time::sleep(self.retry_delay).await;
                        continue;
                    }
                    tracing::error!("Ridder request {} {} failed: {}", method, url, err);
                    return (
                        Exchange {
                            request,
                            response: None,
                        },
                        Err(err),
                    );
                }
            };

            let status = response.status();
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    return (
                        Exchange {
                            request,
                            response: Some(ResponseSummary {
                                status: status.as_u16(),
                                body: String::new(),
                            }),
                        },
                        Err(e.into()),
                    );
                }
            };

            let exchange = Exchange {
                request,
                response: Some(ResponseSummary {
                    status: status.as_u16(),
                    body: text.clone(),
                }),
            };

            if !status.is_success() {
                let err = remote_error(status.as_u16(), &text);
                tracing::error!("Ridder returned {} for {} {}: {}", status, method, url, err);
                return (exchange, Err(err));
            }

            return (exchange, Ok(text));
        }
    }
}

/// Builds the error for a non-success response.
///
/// A body decoding to `{"error": ...}` with a non-empty message wins over the
/// generic status message.
pub fn remote_error(status: u16, body: &str) -> RidderError {
    if let Ok(decoded) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(message) = decoded.error.filter(|e| !e.is_empty()) {
            return RidderError::RemoteError {
                status,
                message,
                stack_trace: decoded.stack_trace.filter(|s| !s.is_empty()),
            };
        }
    }

    let message = if body.trim().is_empty() {
        format!("Ridder returned status {}", status)
    } else {
        format!("Ridder returned status {}: {}", status, body.trim())
    };

    RidderError::RemoteError {
        status,
        message,
        stack_trace: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_prefers_error_field() {
        let err = remote_error(400, r#"{"error":"RidderId 9 not found","stackTrace":"at Find()"}"#);
        match err {
            RidderError::RemoteError {
                status,
                message,
                stack_trace,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "RidderId 9 not found");
                assert_eq!(stack_trace.as_deref(), Some("at Find()"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_remote_error_with_null_stack_trace() {
        let err = remote_error(400, r#"{"error":"RidderId 9 not found","stackTrace":null}"#);
        match err {
            RidderError::RemoteError {
                message,
                stack_trace,
                ..
            } => {
                assert_eq!(message, "RidderId 9 not found");
                assert!(stack_trace.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = remote_error(404, r#"{"error":null,"stackTrace":null}"#);
        assert!(err.to_string().contains("Ridder returned status 404"));
    }

    #[test]
    fn test_remote_error_falls_back_to_status() {
        let err = remote_error(502, "");
        assert_eq!(err.to_string(), "Remote error (502): Ridder returned status 502");

        let err = remote_error(500, r#"{"error":"","stackTrace":""}"#);
        assert!(err.to_string().contains("Ridder returned status 500"));

        let err = remote_error(503, "Service Unavailable");
        assert!(err.to_string().ends_with("Service Unavailable"));
    }

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new("key".to_string(), Some(2), Some(1), None).unwrap();
        assert_eq!(transport.api_key(), "key");
        assert_eq!(transport.max_retries, 2);
        assert_eq!(transport.retry_delay, Duration::from_secs(1));
        assert_eq!(transport.request_count(), 0);
    }
}
