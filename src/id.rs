//! Store-assigned identifiers.
//!
//! Ids combine the creation time in milliseconds with a counter owned by the
//! generator. The counter alone guarantees uniqueness for the lifetime of a
//! store, so two entities created within the same millisecond still get
//! distinct ids. The timestamp part keeps ids readable as creation order.

use std::fmt::{self, Display};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifies a collection inside a store.
    CollectionId
);

string_id!(
    /// Identifies a request inside a store, unique across all collections.
    RequestId
);

#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection_id(&mut self) -> CollectionId {
        CollectionId(self.generate("col"))
    }

    pub fn request_id(&mut self) -> RequestId {
        RequestId(self.generate("req"))
    }

    fn generate(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}-{}", now_ms(), self.counter)
    }
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or_default()
}
