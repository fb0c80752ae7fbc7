//! Newtype wrappers around string identifiers for folders and sources.
//!
//! Identifiers are opaque strings so that seeded records (`"1"`, `"1-2"`)
//! and generated records share one type. Generated ids are time-ordered
//! UUIDv7 values, which keeps creation order visible while staying unique
//! under rapid successive creation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype ID wrapper around `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new time-ordered identifier.
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Wrap an existing identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a folder in the knowledge base.
    FolderId
);

define_id!(
    /// Unique identifier for a knowledge source (file, URL, or text).
    FileId
);

define_id!(
    /// Identifier of an external integration (`zendesk`, `notion`).
    IntegrationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let ids: Vec<FileId> = (0..64).map(|_| FileId::generate()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_display_and_parse() {
        let id: FolderId = "1-2".parse().expect("infallible");
        assert_eq!(id.to_string(), "1-2");
        assert_eq!(id, FolderId::from("1-2"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = FolderId::new("2");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"2\"");
    }
}
