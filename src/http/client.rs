use std::sync::Arc;
use std::time::Instant;

use crate::error::{DispatchError, ValidationError, diagnose};

use super::header::{Header, reduce_headers};
use super::method::HttpMethod;
use super::response::Response;
use super::transport::{Transport, TransportReply, TransportRequest};
use super::url::normalize_url;

/// Runs single request attempts against a [`Transport`].
///
/// The dispatcher never touches application state. It returns a response or
/// an error and leaves the state transitions to its caller.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    origin: Option<String>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            origin: None,
        }
    }

    /// Name this client in cross-origin diagnostics.
    pub fn with_origin(mut self, origin: Option<String>) -> Self {
        self.origin = origin;
        self
    }

    /// Validate and shape user input into a transport request without
    /// issuing it.
    pub fn prepare(
        method: HttpMethod,
        raw_url: &str,
        headers: &[Header],
        body: &str,
    ) -> Result<TransportRequest, ValidationError> {
        if raw_url.trim().is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        let url = normalize_url(raw_url)?;

        let body = body.trim();
        Ok(TransportRequest {
            method,
            url,
            headers: reduce_headers(headers),
            body: (!body.is_empty()).then(|| body.to_string()),
        })
    }

    /// Issue one prepared attempt. No retries.
    pub async fn execute(&self, request: TransportRequest) -> Result<Response, DispatchError> {
        let url = request.url.clone();
        tracing::debug!(method = %request.method, %url, headers = request.headers.len(), "dispatching request");

        let started = Instant::now();
        let result = self.transport.invoke(request).await;
        let time = started.elapsed().as_millis() as u64;

        match result {
            Ok(reply) => {
                tracing::info!(%url, status = reply.status, time, "request completed");
                Ok(into_response(reply, time))
            }
            Err(mut failure) => {
                if let Some(reply) = failure.response.take() {
                    tracing::info!(%url, status = reply.status, time, "request answered with failure status");
                    return Ok(into_response(reply, time));
                }

                let error = diagnose(&failure, &url, self.origin.as_deref());
                tracing::warn!(
                    %url,
                    kind = ?error.kind(),
                    code = failure.code.as_ref().map(|code| code.as_str()),
                    cause = %failure.message,
                    "request failed"
                );
                Err(error)
            }
        }
    }

    pub async fn dispatch(
        &self,
        method: HttpMethod,
        raw_url: &str,
        headers: &[Header],
        body: &str,
    ) -> Result<Response, DispatchError> {
        let request = Self::prepare(method, raw_url, headers, body)?;
        self.execute(request).await
    }
}

fn into_response(reply: TransportReply, time: u64) -> Response {
    Response {
        status: reply.status,
        status_text: reply.status_text,
        headers: reply.headers,
        data: reply.data,
        time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_trims_body_and_reduces_headers() {
        let headers = vec![
            Header::new("Content-Type", "application/json"),
            Header::new("X-Off", "1").disabled(),
        ];
        let request = Dispatcher::prepare(HttpMethod::Post, " api.example.com/items ", &headers, "  {\"a\":1}\n").unwrap();

        assert_eq!(request.url, "https://api.example.com/items");
        assert_eq!(request.body.as_deref(), Some("{\"a\":1}"));
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers["Content-Type"], "application/json");
    }

    #[test]
    fn prepare_drops_whitespace_body() {
        let request = Dispatcher::prepare(HttpMethod::Post, "localhost:3000", &[], " \n ").unwrap();
        assert_eq!(request.body, None);
        assert_eq!(request.url, "http://localhost:3000");
    }

    #[test]
    fn prepare_rejects_before_building_anything() {
        assert_eq!(
            Dispatcher::prepare(HttpMethod::Get, "   ", &[], ""),
            Err(ValidationError::EmptyUrl)
        );
        assert_eq!(
            Dispatcher::prepare(HttpMethod::Get, "/users", &[], ""),
            Err(ValidationError::RelativeUrl)
        );
    }
}
