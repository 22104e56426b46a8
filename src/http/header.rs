use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Header name to value, iteration follows first insertion.
pub type HeaderMapping = IndexMap<String, String>;

/// One editable header row of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// The empty, enabled row the builder shows for a request without headers.
    pub fn blank() -> Self {
        Self::new("", "")
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty() && self.value.trim().is_empty()
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::blank()
    }
}

/// Collapse the edited header rows into the set that is actually sent.
///
/// Disabled rows and rows with a blank key are skipped. A key that appears
/// more than once keeps the value of its last enabled row.
pub fn reduce_headers(headers: &[Header]) -> HeaderMapping {
    headers
        .iter()
        .filter(|header| header.enabled)
        .filter_map(|header| {
            let key = header.key.trim();
            (!key.is_empty()).then(|| (key.to_string(), header.value.clone()))
        })
        .fold(HeaderMapping::new(), |mut active, (key, value)| {
            active.insert(key, value);
            active
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_duplicate_wins_and_disabled_is_dropped() {
        let headers = vec![
            Header::new("A", "1"),
            Header::new("A", "2"),
            Header::new("B", "3").disabled(),
        ];

        let active = reduce_headers(&headers);
        assert_eq!(active.len(), 1);
        assert_eq!(active.get("A").map(String::as_str), Some("2"));
    }

    #[test]
    fn blank_keys_are_skipped() {
        let headers = vec![
            Header::blank(),
            Header::new("   ", "orphan value"),
            Header::new(" Accept ", "application/json"),
        ];

        let active = reduce_headers(&headers);
        assert_eq!(active.len(), 1);
        assert_eq!(active["Accept"], "application/json");
    }

    #[test]
    fn override_keeps_first_position() {
        let headers = vec![
            Header::new("X-First", "a"),
            Header::new("X-Second", "b"),
            Header::new("X-First", "c"),
        ];

        let active = reduce_headers(&headers);
        let pairs: Vec<_> = active.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("X-First", "c"), ("X-Second", "b")]);
    }

    #[test]
    fn disabled_duplicate_does_not_override() {
        let headers = vec![
            Header::new("Authorization", "Bearer live"),
            Header::new("Authorization", "Bearer stale").disabled(),
        ];

        assert_eq!(reduce_headers(&headers)["Authorization"], "Bearer live");
    }
}
