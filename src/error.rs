//! Error types and transport-failure classification.
//!
//! A dispatch ends in one of these, checked in order:
//!
//! 1. [`ValidationError`]: the input was refused before any transport call.
//! 2. The far end answered. That is a normal [`Response`](crate::http::response::Response),
//!    whatever the status, even when the transport reported it as a failure.
//! 3. Connectivity failure: the target could not be reached at all.
//! 4. Cross-origin failure: a generic network error on an http(s) URL with
//!    no sign of the target being unreachable.
//! 5. Anything else.
//!
//! Telling 3 and 4 apart is a heuristic. The same low-level signal can mean
//! either, so [`classify`] is best-effort and the messages say "likely"
//! rather than claiming a cause.

use thiserror::Error;

use crate::http::transport::{ErrorCode, TransportError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL is required")]
    EmptyUrl,

    #[error(
        "Relative URLs are not supported. Please use a full URL (e.g., http://api.example.com/endpoint)"
    )]
    RelativeUrl,

    #[error("Please enter a request name")]
    EmptyRequestName,

    #[error("Collection name cannot be empty")]
    EmptyCollectionName,
}

/// Why a dispatch produced no response. The `Display` text is the only
/// thing shown to the user; the raw transport error is not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(
        "Connection Error: Cannot reach the server at {url}. Possible causes: \
         1) Server is not running or not accessible, 2) Firewall blocking the connection, \
         3) Wrong IP address or port, 4) Network connectivity issue. \
         Check if the server is running and accessible."
    )]
    Connectivity { url: String },

    #[error(
        "CORS Error: The API server at {url} is blocking requests from {origin}. \
         The URL works in your browser, but AJAX/fetch requests are blocked due to missing CORS headers. \
         The server needs to include: Access-Control-Allow-Origin: * (or {origin})."
    )]
    CrossOrigin { url: String, origin: String },

    #[error(
        "Network Error: {message}. URL attempted: {url}. Note: If this URL works when you open it \
         directly in your browser, it's likely a CORS issue. The server needs CORS headers. \
         Otherwise, check: 1) Server accessibility, 2) Firewall, 3) Network connectivity."
    )]
    Network { url: String, message: String },

    #[error("{0}")]
    Transport(String),
}

impl DispatchError {
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            DispatchError::Validation(_) => None,
            DispatchError::Connectivity { .. } => Some(FailureKind::Connectivity),
            DispatchError::CrossOrigin { .. } => Some(FailureKind::CrossOrigin),
            DispatchError::Network { .. } => Some(FailureKind::Network),
            DispatchError::Transport(_) => Some(FailureKind::Other),
        }
    }
}

/// Outcome category of a failed transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The far end answered; not an error at dispatch level.
    Answered,
    Connectivity,
    CrossOrigin,
    /// Network-level failure that fits neither of the above.
    Network,
    Other,
}

/// The normalized facts [`classify`] decides on.
#[derive(Debug, Clone, Copy)]
pub struct FailureDescriptor<'a> {
    pub has_response: bool,
    pub code: Option<&'a ErrorCode>,
    pub message: &'a str,
    pub url: &'a str,
}

impl<'a> FailureDescriptor<'a> {
    pub fn new(error: &'a TransportError, url: &'a str) -> Self {
        Self {
            has_response: error.response.is_some(),
            code: error.code.as_ref(),
            message: &error.message,
            url,
        }
    }
}

const UNREACHABLE_MARKERS: [&str; 4] = [
    "err_internet_disconnected",
    "err_name_not_resolved",
    "err_connection_refused",
    "err_connection_timed_out",
];

pub fn classify(failure: &FailureDescriptor<'_>) -> FailureKind {
    if failure.has_response {
        return FailureKind::Answered;
    }

    let message = failure.message.to_ascii_lowercase();
    let code = failure.code;

    // Any low-level code means the failure happened on the wire.
    let network_level =
        code.is_some() || message.contains("network error") || message.contains("failed to fetch");
    if !network_level {
        return FailureKind::Other;
    }

    let unreachable = code.is_some_and(ErrorCode::is_unreachable)
        || UNREACHABLE_MARKERS.iter().any(|marker| message.contains(marker));
    if unreachable {
        return FailureKind::Connectivity;
    }

    let http_url = failure
        .url
        .get(..4)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http"));
    let cors_signal = failure.message.contains("CORS")
        || matches!(code, Some(ErrorCode::Cors | ErrorCode::Network));
    if http_url && cors_signal {
        return FailureKind::CrossOrigin;
    }

    FailureKind::Network
}

/// Turn a transport failure into the user-facing error for `url`.
/// `origin` names this client in cross-origin diagnostics.
pub fn diagnose(error: &TransportError, url: &str, origin: Option<&str>) -> DispatchError {
    let url_owned = url.to_string();
    match classify(&FailureDescriptor::new(error, url)) {
        FailureKind::Connectivity => DispatchError::Connectivity { url: url_owned },
        FailureKind::CrossOrigin => DispatchError::CrossOrigin {
            url: url_owned,
            origin: origin.unwrap_or("this client").to_string(),
        },
        FailureKind::Network => DispatchError::Network {
            url: url_owned,
            message: non_empty(&error.message, "Network error"),
        },
        FailureKind::Answered | FailureKind::Other => {
            DispatchError::Transport(non_empty(&error.message, "Network error"))
        }
    }
}

fn non_empty(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}
