//! Identifier newtypes
//!
//! The backend sends most identifiers as integers, but the client treats them
//! as opaque: they are only compared and echoed back in request paths. Each
//! newtype therefore accepts either a JSON number or a JSON string and keeps
//! the textual form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Signed(v) => v.to_string(),
            RawId::Unsigned(v) => v.to_string(),
            RawId::Text(v) => v,
        }
    }
}

/// Deserializes a number-or-string identifier into its textual form
pub fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserialize_opaque_id(deserializer).map(Self)
            }
        }

        impl $name {
            /// Creates an identifier from its textual form
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the textual form of the identifier
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
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

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
            }
        }
    };
}

opaque_id!(
    /// Backend identifier of the authenticated user
    UserId
);
opaque_id!(
    /// Identifier of a bank connection (a linked Plaid item)
    ConnectionId
);
opaque_id!(
    /// Backend record identifier of an account, used as the target of mutations
    AccountRecordId
);
opaque_id!(
    /// Plaid account identifier, used to match accounts across connections
    AccountKey
);
