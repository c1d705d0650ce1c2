//! Newtype IDs for type-safe identifiers.
//!
//! The remote API hands out numeric ids, but nothing in the storefront does
//! arithmetic on them, so they are held as strings. Deserialization accepts
//! either a JSON number or a JSON string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire form of an identifier before normalization.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique, stable identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ItemId);
define_id!(OrderId);
define_id!(InquiryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ItemId::new("item-123");
        assert_eq!(id.as_str(), "item-123");
    }

    #[test]
    fn test_id_from_number() {
        let id: ItemId = 42u64.into();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_id_deserializes_from_number_or_string() {
        let from_number: ItemId = serde_json::from_str("7").unwrap();
        let from_string: ItemId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = OrderId::new("15");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"15\"");
    }

    #[test]
    fn test_id_equality() {
        let id1 = ItemId::new("same");
        let id2 = ItemId::new("same");
        let id3 = ItemId::new("different");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }
}
