use serde::{Deserialize, Serialize};

use crate::id::{CollectionId, RequestId};

use super::header::Header;
use super::method::HttpMethod;

/// A request as kept by the store, either inside a collection or as the
/// floating current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<CollectionId>,
}

/// Everything a [`Request`] holds except the store-assigned fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: Option<String>,
}

impl NewRequest {
    pub fn into_request(self, id: RequestId, collection_id: Option<CollectionId>) -> Request {
        Request {
            id,
            name: self.name,
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            collection_id,
        }
    }

    /// The same fields as a patch that overwrites all of them, body included.
    pub fn into_patch(self) -> RequestPatch {
        RequestPatch {
            name: Some(self.name),
            method: Some(self.method),
            url: Some(self.url),
            headers: Some(self.headers),
            body: Some(self.body),
        }
    }
}

/// Partial update of a request. `None` leaves a field untouched; for the body
/// `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestPatch {
    pub name: Option<String>,
    pub method: Option<HttpMethod>,
    pub url: Option<String>,
    pub headers: Option<Vec<Header>>,
    pub body: Option<Option<String>>,
}

impl RequestPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn apply(&self, request: &mut Request) {
        if let Some(name) = &self.name {
            request.name = name.clone();
        }
        if let Some(method) = self.method {
            request.method = method;
        }
        if let Some(url) = &self.url {
            request.url = url.clone();
        }
        if let Some(headers) = &self.headers {
            request.headers = headers.clone();
        }
        if let Some(body) = &self.body {
            request.body = body.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Request {
        NewRequest {
            name: "List users".into(),
            method: HttpMethod::Get,
            url: "https://api.example.com/users".into(),
            headers: vec![Header::new("Accept", "application/json")],
            body: Some("{}".into()),
        }
        .into_request(RequestId::from("req-1"), None)
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let mut request = sample();
        RequestPatch::name("Renamed").apply(&mut request);

        assert_eq!(request.name, "Renamed");
        assert_eq!(request.url, "https://api.example.com/users");
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn patch_can_clear_body() {
        let mut request = sample();
        let patch = RequestPatch {
            body: Some(None),
            ..Default::default()
        };
        patch.apply(&mut request);
        assert_eq!(request.body, None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut request = sample();
        request.collection_id = Some(CollectionId::from("col-1"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["collectionId"], "col-1");
        assert_eq!(json["method"], "GET");
        assert_eq!(json["headers"][0]["enabled"], true);
    }
}
