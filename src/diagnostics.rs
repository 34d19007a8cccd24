use crate::transport::{Exchange, RequestSummary, ResponseSummary};

/// A non-fatal validation report for one create/update call.
///
/// Carries the joined warning text together with the request that was sent
/// and, when one arrived, the response, so the event can be audited later.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationEvent {
    pub message: String,
    pub request: RequestSummary,
    pub response: Option<ResponseSummary>,
}

impl ValidationEvent {
    pub fn new(message: String, exchange: &Exchange) -> Self {
        Self {
            message,
            request: exchange.request.clone(),
            response: exchange.response.clone(),
        }
    }
}

/// Receiver for validation events.
///
/// Implementations must not fail; the call that produced the event has
/// already completed and its result is returned to the caller regardless.
pub trait WarningSink: Send + Sync {
    fn capture_warning(&self, event: ValidationEvent);
}

/// Default sink: writes every event to the `tracing` warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn capture_warning(&self, event: ValidationEvent) {
        let status = event.response.as_ref().map(|r| r.status);
        tracing::warn!(
            method = %event.request.method,
            url = %event.request.url,
            status = ?status,
            "Ridder validation: {}",
            event.message
        );
        if let Some(ref body) = event.request.body {
            tracing::debug!("Validated request body: {}", body);
        }
    }
}
