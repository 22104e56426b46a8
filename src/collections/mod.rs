//! Named, ordered groups of saved requests.

use serde::{Deserialize, Serialize};

use crate::http::request::Request;
use crate::id::{CollectionId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub requests: Vec<Request>,
}

impl Collection {
    pub fn new(id: CollectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            requests: Vec::new(),
        }
    }

    pub fn request(&self, id: &RequestId) -> Option<&Request> {
        self.requests.iter().find(|request| &request.id == id)
    }

    pub fn request_mut(&mut self, id: &RequestId) -> Option<&mut Request> {
        self.requests.iter_mut().find(|request| &request.id == id)
    }

    /// Remove the request with `id`, returning it if it was here.
    pub fn remove_request(&mut self, id: &RequestId) -> Option<Request> {
        let index = self.requests.iter().position(|request| &request.id == id)?;
        Some(self.requests.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::NewRequest;

    fn collection_with(ids: &[&str]) -> Collection {
        let mut collection = Collection::new(CollectionId::from("col-1"), "Users API");
        for id in ids {
            let request = NewRequest {
                name: format!("request {id}"),
                ..Default::default()
            }
            .into_request(RequestId::from(*id), Some(collection.id.clone()));
            collection.requests.push(request);
        }
        collection
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut collection = collection_with(&["a", "b", "c"]);
        let removed = collection.remove_request(&RequestId::from("b"));

        assert_eq!(removed.map(|r| r.name), Some("request b".to_string()));
        let remaining: Vec<_> = collection.requests.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(remaining, vec!["a", "c"]);
    }

    #[test]
    fn missing_request_is_none() {
        let mut collection = collection_with(&["a"]);
        assert!(collection.request(&RequestId::from("z")).is_none());
        assert!(collection.remove_request(&RequestId::from("z")).is_none());
        assert_eq!(collection.requests.len(), 1);
    }
}
