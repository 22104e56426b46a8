//! Form state of the request builder.

use crate::error::ValidationError;
use crate::http::header::Header;
use crate::http::method::HttpMethod;
use crate::http::request::{NewRequest, Request};
use crate::http::url::normalize_url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: String,
    pub delay_seconds: u32,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            method: HttpMethod::Get,
            url: String::new(),
            headers: vec![Header::blank()],
            body: String::new(),
            delay_seconds: 0,
        }
    }
}

impl RequestDraft {
    pub fn with_delay(delay_seconds: u32) -> Self {
        Self {
            delay_seconds,
            ..Self::default()
        }
    }

    /// Show `request` in the builder. The delay setting belongs to the
    /// builder and is kept.
    pub fn load(&mut self, request: &Request) {
        self.name = request.name.clone();
        self.method = request.method;
        self.url = request.url.clone();
        self.headers = if request.headers.is_empty() {
            vec![Header::blank()]
        } else {
            request.headers.clone()
        };
        self.body = request.body.clone().unwrap_or_default();
    }

    /// Back to an empty form, keeping the delay setting.
    pub fn reset(&mut self) {
        *self = Self::with_delay(self.delay_seconds);
    }

    pub fn can_send(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn add_header(&mut self) {
        self.headers.push(Header::blank());
    }

    pub fn remove_header(&mut self, index: usize) {
        if index < self.headers.len() {
            self.headers.remove(index);
        }
    }

    pub fn set_header_key(&mut self, index: usize, key: String) {
        if let Some(header) = self.headers.get_mut(index) {
            header.key = key;
        }
    }

    pub fn set_header_value(&mut self, index: usize, value: String) {
        if let Some(header) = self.headers.get_mut(index) {
            header.value = value;
        }
    }

    pub fn set_header_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(header) = self.headers.get_mut(index) {
            header.enabled = enabled;
        }
    }

    /// Parse the delay field. Negative or unparsable input means no delay.
    pub fn set_delay_input(&mut self, input: &str) {
        self.delay_seconds = input
            .trim()
            .parse::<i64>()
            .ok()
            .map(|seconds| seconds.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0);
    }

    /// Validate the form for saving. The URL goes through the same
    /// normalization as a send, rows that are blank on both sides are
    /// dropped and the body is trimmed.
    pub fn to_new_request(&self) -> Result<NewRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyRequestName);
        }
        let url = normalize_url(&self.url)?;

        let body = self.body.trim();
        Ok(NewRequest {
            name: name.to_string(),
            method: self.method,
            url,
            headers: self
                .headers
                .iter()
                .filter(|header| !header.is_blank())
                .cloned()
                .collect(),
            body: (!body.is_empty()).then(|| body.to_string()),
        })
    }
}
