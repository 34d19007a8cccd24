use crate::config::ServiceConfig;
use crate::diagnostics::{TracingSink, ValidationEvent, WarningSink};
use crate::errors::RidderError;
use crate::sanitize::Validated;
use crate::transport::HttpTransport;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub const API_NAME: &str = "Ridder";

/// Joins a base URL and a relative path with a single slash.
///
/// The relative path is used verbatim; it is not escaped.
pub fn url(base_path: &str, relative_path: &str) -> String {
    format!("{}/{}", base_path, relative_path)
}

/// Client for the Ridder REST API.
///
/// Resource operations live in the `contacts`, `organizations` and
/// `opportunities` modules.
pub struct RidderService {
    api_url: String,
    pub(crate) transport: HttpTransport,
    warning_sink: Arc<dyn WarningSink>,
}

impl RidderService {
    /// Creates a new `RidderService`.
    ///
    /// Fails with `ConfigurationError` when the API URL or key is empty.
    /// Trailing slashes are stripped from the URL.
    pub fn new(config: &ServiceConfig) -> Result<Self, RidderError> {
        if config.api_url.trim().is_empty() {
            return Err(RidderError::ConfigurationError(
                "Service API URL not provided".to_string(),
            ));
        }
        if config.api_key.is_empty() {
            return Err(RidderError::ConfigurationError(
                "Service API Key not provided".to_string(),
            ));
        }

        let transport = HttpTransport::new(
            config.api_key.clone(),
            config.max_retries,
            config.seconds_between_retries,
            config.timeout_seconds,
        )?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            transport,
            warning_sink: Arc::new(TracingSink),
        })
    }

    /// Replaces the sink that receives validation warnings.
    pub fn with_warning_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.warning_sink = sink;
        self
    }

    pub fn api_name(&self) -> &'static str {
        API_NAME
    }

    pub fn api_key(&self) -> &str {
        self.transport.api_key()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Number of HTTP requests sent since construction or the last reset.
    pub fn api_call_count(&self) -> u64 {
        self.transport.request_count()
    }

    pub fn api_reset(&self) {
        self.transport.reset_request_count();
    }

    pub(crate) fn url(&self, path: &str) -> String {
        url(&self.api_url, path)
    }

    /// GET `path` and decode the body into `T`.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RidderError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let (_, outcome) = self.transport.send(Method::GET, &url, None).await;
        decode(&outcome?)
    }

    /// POST a validated record to `path`, report any validation warnings and
    /// decode the body into `T`.
    ///
    /// Warnings are reported even when the request itself fails; they never
    /// change the result.
    pub(crate) async fn post<B, T>(&self, path: &str, validated: &Validated<B>) -> Result<T, RidderError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = encode(&validated.record)?;
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let (exchange, outcome) = self.transport.send(Method::POST, &url, Some(body)).await;

        if let Some(message) = validated.message() {
            self.warning_sink
                .capture_warning(ValidationEvent::new(message, &exchange));
        }

        decode(&outcome?)
    }

    /// POST `body` to `path`, ignoring any response body.
    pub(crate) async fn post_without_response<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), RidderError> {
        let body = encode(body)?;
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let (_, outcome) = self.transport.send(Method::POST, &url, Some(body)).await;
        outcome.map(|_| ())
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, RidderError> {
    serde_json::to_string(body).map_err(|e| RidderError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, RidderError> {
    serde_json::from_str(body).map_err(|e| {
        RidderError::DecodeError(format!("Failed to parse Ridder response: {}", e))
    })
}
