use std::fmt;

use serde::{Deserialize, Serialize};

/// Host-assigned identifiers are opaque strings; each record family gets its
/// own newtype so an object id can never be passed where a player id belongs.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Canvas objects: tokens, drawn paths, placed graphics, text badges
define_id!(ObjectId);

// Journal and sheet records
define_id!(CharacterId);
define_id!(HandoutId);

// People and places
define_id!(PlayerId);
define_id!(PageId);
