use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};

use super::header::HeaderMapping;
use super::method::HttpMethod;
use super::response::ResponseData;

/// What the dispatcher hands to a transport: an absolute URL, the active
/// header set and an optional, already trimmed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMapping,
    pub body: Option<String>,
}

/// What the far end answered, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportReply {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderMapping,
    pub data: ResponseData,
}

/// Low-level failure signal, named after the codes browsers and HTTP
/// libraries report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    Network,
    Cors,
    InternetDisconnected,
    NameNotResolved,
    ConnectionRefused,
    ConnectionTimedOut,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::Network => "ERR_NETWORK",
            ErrorCode::Cors => "ERR_CORS",
            ErrorCode::InternetDisconnected => "ERR_INTERNET_DISCONNECTED",
            ErrorCode::NameNotResolved => "ERR_NAME_NOT_RESOLVED",
            ErrorCode::ConnectionRefused => "ERR_CONNECTION_REFUSED",
            ErrorCode::ConnectionTimedOut => "ERR_CONNECTION_TIMED_OUT",
            ErrorCode::Other(code) => code,
        }
    }

    /// Codes meaning the target could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            ErrorCode::InternetDisconnected
                | ErrorCode::NameNotResolved
                | ErrorCode::ConnectionRefused
                | ErrorCode::ConnectionTimedOut
        )
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transport that did not produce a normal reply. `response` is set when
/// the far end did answer but the transport still reported a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportError {
    pub response: Option<TransportReply>,
    pub code: Option<ErrorCode>,
    pub message: String,
}

impl TransportError {
    pub fn new(code: Option<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            response: None,
            code,
            message: message.into(),
        }
    }

    pub fn answered(reply: TransportReply, message: impl Into<String>) -> Self {
        Self {
            response: Some(reply),
            code: None,
            message: message.into(),
        }
    }
}

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TransportReply, TransportError>> + Send + 'a>>;

/// The HTTP-calling capability the dispatcher drives. One call is exactly one
/// attempt; implementations must not retry and must not turn non-2xx
/// statuses into errors.
pub trait Transport: Send + Sync {
    fn invoke(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// Production transport on top of `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, max_redirects: usize) -> Result<Self, String> {
        let mut builder = Client::builder().redirect(reqwest::redirect::Policy::limited(max_redirects));
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| format!("Failed to build HTTP client: {err}"))?;
        Ok(Self { client })
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportReply, TransportError> {
        let method: Method = request.method.into();
        let headers = build_headers(&request.headers)
            .map_err(|message| TransportError::new(None, message))?;

        let mut builder = self.client.request(method.clone(), &request.url).headers(headers);
        if let Some(body) = request.body {
            if !matches!(method, Method::GET | Method::HEAD | Method::OPTIONS) {
                builder = builder.body(body);
            }
        }

        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let headers = collect_headers(response.headers());

        let bytes = response.bytes().await.map_err(|err| {
            let mut failure = transport_error(err);
            failure.message = format!("Failed to read response: {}", failure.message);
            failure
        })?;

        Ok(TransportReply {
            status: status.as_u16(),
            status_text,
            headers,
            data: ResponseData::from_bytes(&bytes),
        })
    }
}

impl Transport for ReqwestTransport {
    fn invoke(&self, request: TransportRequest) -> TransportFuture<'_> {
        Box::pin(self.send(request))
    }
}

fn build_headers(input: &HeaderMapping) -> Result<HeaderMap, String> {
    let mut headers = HeaderMap::new();

    for (key, value) in input {
        let header_name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|err| format!("Invalid header name `{key}`: {err}"))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| format!("Invalid header value for `{key}`: {err}"))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

/// Flatten response headers. A header sent more than once keeps all its
/// values, joined with `", "` in arrival order.
fn collect_headers(input: &HeaderMap) -> HeaderMapping {
    let mut headers = HeaderMapping::new();

    for (key, value) in input {
        let value = value.to_str().unwrap_or("<binary>");
        headers
            .entry(key.to_string())
            .and_modify(|joined: &mut String| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    headers
}

fn transport_error(err: reqwest::Error) -> TransportError {
    TransportError::new(error_code(&err), error_chain(&err))
}

const CONNECTION_RESET: &str = "ECONNRESET";

fn error_code(err: &reqwest::Error) -> Option<ErrorCode> {
    if err.is_timeout() {
        return Some(ErrorCode::ConnectionTimedOut);
    }
    if !err.is_connect() {
        // Connected, then dropped before a complete reply arrived.
        return (err.is_request() || err.is_body())
            .then(|| ErrorCode::Other(CONNECTION_RESET.to_string()));
    }

    let chain = error_chain(err).to_ascii_lowercase();
    let code = if chain.contains("dns") || chain.contains("lookup") || chain.contains("resolve") {
        ErrorCode::NameNotResolved
    } else if chain.contains("refused") {
        ErrorCode::ConnectionRefused
    } else if chain.contains("unreachable") {
        ErrorCode::InternetDisconnected
    } else {
        ErrorCode::Network
    };
    Some(code)
}

/// `reqwest` keeps the useful part (the OS or resolver message) in the
/// source chain, so the whole chain becomes the message.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_codes() {
        assert!(ErrorCode::ConnectionRefused.is_unreachable());
        assert!(ErrorCode::NameNotResolved.is_unreachable());
        assert!(!ErrorCode::Network.is_unreachable());
        assert!(!ErrorCode::Cors.is_unreachable());
        assert!(!ErrorCode::Other("ECONNRESET".into()).is_unreachable());
    }

    #[test]
    fn invalid_header_names_are_reported() {
        let mut headers = HeaderMapping::new();
        headers.insert("Bad Header".into(), "x".into());
        let err = build_headers(&headers).unwrap_err();
        assert!(err.contains("Invalid header name `Bad Header`"));
    }

    #[test]
    fn repeated_response_headers_are_joined() {
        let mut input = HeaderMap::new();
        input.append("set-cookie", HeaderValue::from_static("a=1"));
        input.append("content-type", HeaderValue::from_static("text/plain"));
        input.append("set-cookie", HeaderValue::from_static("b=2"));

        let headers = collect_headers(&input);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["set-cookie"], "a=1, b=2");
        assert_eq!(headers["content-type"], "text/plain");
    }

    #[test]
    fn builds_valid_headers() {
        let mut headers = HeaderMapping::new();
        headers.insert("Accept".into(), "application/json".into());
        headers.insert("X-Trace".into(), "abc".into());
        let map = build_headers(&headers).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["accept"], "application/json");
    }
}
