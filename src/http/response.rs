use serde::Serialize;

use super::header::HeaderMapping;

/// One completed attempt. Any status the far end answered with lands here,
/// 4xx and 5xx included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderMapping,
    pub data: ResponseData,
    /// Elapsed milliseconds between issuing the request and receiving it.
    pub time: u64,
}

impl Response {
    pub fn status_class(&self) -> StatusClass {
        match self.status {
            200..=299 => StatusClass::Success,
            400.. => StatusClass::Error,
            _ => StatusClass::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Info,
    Error,
}

/// Response payload: decoded JSON when the body parses as JSON, raw text
/// otherwise.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    #[default]
    Empty,
    Json(serde_json::Value),
    Text(String),
}

impl ResponseData {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return ResponseData::Empty;
        }
        match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(value) => ResponseData::Json(value),
            Err(_) => ResponseData::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn is_html(&self) -> bool {
        let ResponseData::Text(text) = self else {
            return false;
        };
        let start = text.trim_start();
        ["<!doctype html", "<html"].iter().any(|prefix| {
            start
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }

    /// Display form: JSON is pretty-printed, text is returned as-is.
    pub fn pretty(&self) -> String {
        match self {
            ResponseData::Empty => String::new(),
            ResponseData::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseData::Text(text) => text.clone(),
        }
    }
}
