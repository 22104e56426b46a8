//! The application store: single source of truth for collections, the
//! current request draft and the outcome of the latest dispatch.
//!
//! Every mutation goes through a named operation. All operations are
//! synchronous and total: an id that does not resolve makes the operation a
//! no-op rather than an error.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::collections::Collection;
use crate::error::{DispatchError, FailureKind};
use crate::http::request::{NewRequest, Request, RequestPatch};
use crate::http::response::Response;
use crate::id::{CollectionId, IdGenerator, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Short-lived message for the user. The store only holds it; expiry is
/// scheduled by whoever raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Changes every time a notification is set, so an expiry scheduled for an
/// older notification can tell it has been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotificationId(u64);

impl Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct Store {
    collections: Vec<Collection>,
    current_request: Option<Request>,
    response: Option<Response>,
    loading: bool,
    error: Option<String>,
    error_kind: Option<FailureKind>,
    countdown: Option<u32>,
    notification: Option<Notification>,
    notification_id: NotificationId,
    ids: IdGenerator,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, id: &CollectionId) -> Option<&Collection> {
        self.collections.iter().find(|collection| &collection.id == id)
    }

    pub fn current_request(&self) -> Option<&Request> {
        self.current_request.as_ref()
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Category of the dispatch failure behind [`Store::error`], when the
    /// error came from a transport.
    pub fn error_kind(&self) -> Option<FailureKind> {
        self.error_kind
    }

    pub fn countdown(&self) -> Option<u32> {
        self.countdown
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn notification_id(&self) -> NotificationId {
        self.notification_id
    }

    /// Find a request in whichever collection holds it.
    pub fn find_request(&self, id: &RequestId) -> Option<&Request> {
        self.collections
            .iter()
            .find_map(|collection| collection.request(id))
    }

    pub fn add_collection(&mut self, name: impl Into<String>) -> CollectionId {
        let id = self.ids.collection_id();
        self.collections.push(Collection::new(id.clone(), name));
        tracing::debug!(collection = %id, "collection added");
        id
    }

    pub fn delete_collection(&mut self, id: &CollectionId) {
        self.collections.retain(|collection| &collection.id != id);
    }

    pub fn update_collection(&mut self, id: &CollectionId, name: impl Into<String>) {
        if let Some(collection) = self.collection_mut(id) {
            collection.name = name.into();
        }
    }

    /// Store a new request under a fresh id and make it the current request.
    /// It is appended to `collection_id` when that collection exists,
    /// otherwise it stays a floating draft.
    pub fn add_request(&mut self, request: NewRequest, collection_id: Option<&CollectionId>) -> RequestId {
        let id = self.ids.request_id();
        let target = collection_id.and_then(|collection_id| {
            self.collections
                .iter()
                .position(|collection| &collection.id == collection_id)
        });

        let owner = target.map(|index| self.collections[index].id.clone());
        let request = request.into_request(id.clone(), owner);
        if let Some(index) = target {
            self.collections[index].requests.push(request.clone());
        }
        tracing::debug!(request = %id, collection = ?request.collection_id, "request added");
        self.current_request = Some(request);
        id
    }

    /// Merge `patch` into the current request (when its id matches) and into
    /// the collection entry with that id.
    pub fn update_request(&mut self, id: &RequestId, patch: &RequestPatch) {
        if let Some(current) = self.current_request.as_mut().filter(|current| &current.id == id) {
            patch.apply(current);
        }
        if let Some(stored) = self
            .collections
            .iter_mut()
            .find_map(|collection| collection.request_mut(id))
        {
            patch.apply(stored);
        }
    }

    /// Remove the request from whichever collection holds it and drop it as
    /// current request. Returns the removed collection entry, if any.
    pub fn delete_request(&mut self, id: &RequestId) -> Option<Request> {
        let removed = self
            .collections
            .iter_mut()
            .find_map(|collection| collection.remove_request(id));
        if self.current_request.as_ref().is_some_and(|current| &current.id == id) {
            self.current_request = None;
        }
        removed
    }

    pub fn set_current_request(&mut self, request: Option<Request>) {
        self.current_request = request;
    }

    pub fn set_response(&mut self, response: Option<Response>) {
        self.response = response;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
        self.error_kind = None;
    }

    /// Record a failed dispatch: its message and its category.
    pub fn set_failure(&mut self, error: &DispatchError) {
        self.error = Some(error.to_string());
        self.error_kind = error.kind();
    }

    pub fn set_countdown(&mut self, countdown: Option<u32>) {
        self.countdown = countdown;
    }

    pub fn set_notification(&mut self, notification: Option<Notification>) {
        self.notification = notification;
        self.notification_id.0 += 1;
    }

    fn collection_mut(&mut self, id: &CollectionId) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|collection| &collection.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::header::Header;
    use crate::http::method::HttpMethod;

    fn new_request(name: &str) -> NewRequest {
        NewRequest {
            name: name.into(),
            method: HttpMethod::Get,
            url: "https://api.example.com".into(),
            headers: vec![],
            body: None,
        }
    }

    #[test]
    fn add_collection_issues_fresh_ids() {
        let mut store = Store::new();
        let first = store.add_collection("X");
        let second = store.add_collection("X");

        assert_ne!(first, second);
        assert_eq!(store.collections().len(), 2);
        let matching: Vec<_> = store.collections().iter().filter(|c| c.id == first).collect();
        assert_eq!(matching.len(), 1);
        assert!(matching[0].requests.is_empty());
        assert_eq!(matching[0].name, "X");
    }

    #[test]
    fn delete_collection_keeps_the_others() {
        let mut store = Store::new();
        let first = store.add_collection("Collection 1");
        store.add_collection("Collection 2");

        store.delete_collection(&first);
        assert_eq!(store.collections().len(), 1);
        assert_eq!(store.collections()[0].name, "Collection 2");
    }

    #[test]
    fn delete_unknown_collection_is_noop() {
        let mut store = Store::new();
        store.add_collection("Keep");
        store.delete_collection(&CollectionId::from("missing"));
        assert_eq!(store.collections().len(), 1);
    }

    #[test]
    fn update_collection_renames() {
        let mut store = Store::new();
        let id = store.add_collection("Old Name");
        store.update_collection(&id, "New Name");
        store.update_collection(&CollectionId::from("missing"), "Ignored");
        assert_eq!(store.collections()[0].name, "New Name");
    }

    #[test]
    fn add_request_appends_and_becomes_current() {
        let mut store = Store::new();
        let collection = store.add_collection("Test Collection");
        let id = store.add_request(new_request("Test Request"), Some(&collection));

        let stored = &store.collection(&collection).unwrap().requests;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Test Request");
        assert_eq!(stored[0].collection_id.as_ref(), Some(&collection));
        assert_eq!(store.current_request().map(|r| &r.id), Some(&id));
    }

    #[test]
    fn add_request_to_unknown_collection_floats() {
        let mut store = Store::new();
        store.add_collection("Other");
        let id = store.add_request(new_request("Floating"), Some(&CollectionId::from("missing")));

        assert!(store.find_request(&id).is_none());
        let current = store.current_request().unwrap();
        assert_eq!(current.id, id);
        assert_eq!(current.collection_id, None);
    }

    #[test]
    fn update_request_reaches_current_and_collection_copies() {
        let mut store = Store::new();
        let collection = store.add_collection("C");
        let id = store.add_request(new_request("Before"), Some(&collection));

        store.update_request(&id, &RequestPatch::name("Y"));
        assert_eq!(store.current_request().unwrap().name, "Y");
        assert_eq!(store.find_request(&id).unwrap().name, "Y");
    }

    #[test]
    fn update_unknown_request_is_noop() {
        let mut store = Store::new();
        let collection = store.add_collection("C");
        let id = store.add_request(new_request("Stays"), Some(&collection));

        store.update_request(&RequestId::from("missing"), &RequestPatch::name("Changed"));
        assert_eq!(store.current_request().unwrap().name, "Stays");
        assert_eq!(store.find_request(&id).unwrap().name, "Stays");
    }

    #[test]
    fn update_leaves_other_current_request_alone() {
        let mut store = Store::new();
        let collection = store.add_collection("C");
        let first = store.add_request(new_request("First"), Some(&collection));
        let second = store.add_request(new_request("Second"), Some(&collection));

        store.update_request(&first, &RequestPatch::name("First v2"));
        let current = store.current_request().unwrap();
        assert_eq!(current.id, second);
        assert_eq!(current.name, "Second");
        assert_eq!(store.find_request(&first).unwrap().name, "First v2");
    }

    #[test]
    fn editing_the_current_copy_does_not_touch_the_collection() {
        let mut store = Store::new();
        let collection = store.add_collection("C");
        let id = store.add_request(new_request("Saved"), Some(&collection));

        let mut draft = store.current_request().cloned().unwrap();
        draft.headers.push(Header::new("X-Draft", "1"));
        store.set_current_request(Some(draft));

        assert!(store.find_request(&id).unwrap().headers.is_empty());
    }

    #[test]
    fn delete_request_clears_current() {
        let mut store = Store::new();
        let collection = store.add_collection("C");
        let id = store.add_request(new_request("Doomed"), Some(&collection));

        let removed = store.delete_request(&id);
        assert_eq!(removed.map(|r| r.name), Some("Doomed".to_string()));
        assert!(store.current_request().is_none());
        assert!(store.collection(&collection).unwrap().requests.is_empty());
    }

    #[test]
    fn delete_request_keeps_unrelated_current() {
        let mut store = Store::new();
        let collection = store.add_collection("C");
        let doomed = store.add_request(new_request("Doomed"), Some(&collection));
        let kept = store.add_request(new_request("Kept"), Some(&collection));

        store.delete_request(&doomed);
        assert_eq!(store.current_request().map(|r| &r.id), Some(&kept));
    }

    #[test]
    fn setters_replace_values() {
        let mut store = Store::new();
        store.set_loading(true);
        store.set_error(Some("boom".into()));
        store.set_countdown(Some(3));
        store.set_error(None);

        assert!(store.loading());
        assert_eq!(store.error(), None);
        assert_eq!(store.countdown(), Some(3));
    }

    #[test]
    fn failure_keeps_its_kind_until_replaced() {
        let mut store = Store::new();
        store.set_failure(&DispatchError::CrossOrigin {
            url: "https://api.example.com".into(),
            origin: "this client".into(),
        });
        assert_eq!(store.error_kind(), Some(FailureKind::CrossOrigin));
        assert!(store.error().unwrap().starts_with("CORS Error"));

        store.set_error(Some("URL is required".into()));
        assert_eq!(store.error_kind(), None);
        assert_eq!(store.error(), Some("URL is required"));
    }

    #[test]
    fn each_notification_gets_a_new_id() {
        let mut store = Store::new();
        store.set_notification(Some(Notification::success("one")));
        let first = store.notification_id();
        store.set_notification(Some(Notification::success("two")));

        assert_ne!(first, store.notification_id());
        assert_eq!(store.notification().map(|n| n.message.as_str()), Some("two"));
    }
}
