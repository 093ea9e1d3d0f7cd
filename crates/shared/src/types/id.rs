//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UserId` where an `EntryId` is expected.
//! IDs are store-assigned, monotonically increasing positive integers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a path or query value is not a valid ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id: {0:?}")]
pub struct InvalidId(pub String);

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Returns the inner integer.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidId;

            /// Parses a well-formed positive integer.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().parse::<i32>() {
                    Ok(n) if n > 0 => Ok(Self(n)),
                    _ => Err(InvalidId(s.to_string())),
                }
            }
        }
    };
}

typed_id!(EntryId, "Unique identifier for a ledger entry.");
typed_id!(CategoryId, "Unique identifier for a category.");
typed_id!(UserId, "Unique identifier for a user.");

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("42", 42)]
    #[case(" 7 ", 7)]
    fn test_parse_valid_ids(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(raw.parse::<EntryId>().unwrap(), EntryId(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("99999999999")]
    fn test_parse_invalid_ids(#[case] raw: &str) {
        assert_eq!(raw.parse::<CategoryId>(), Err(InvalidId(raw.to_string())));
    }

    #[test]
    fn test_display_and_serde_are_transparent() {
        let id = UserId(12);
        assert_eq!(id.to_string(), "12");
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
        assert_eq!(id.into_inner(), 12);
    }
}
