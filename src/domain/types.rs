//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers are validated on construction (and on deserialization) so a
//! record that reached the store always carries a usable id.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided value does not name a known lead stage.
    #[error("unknown lead stage: {0}")]
    UnknownStage(String),
    /// Provided value does not name a known order status.
    #[error("unknown order status: {0}")]
    UnknownStatus(String),
    /// Provided value does not name a navigation tab.
    #[error("unknown tab: {0}")]
    UnknownTab(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(LeadId, "Server-assigned identifier of a lead.");
id_newtype!(OrderId, "Server-assigned identifier of an order.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_rejects_non_positive_values() {
        assert_eq!(LeadId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(OrderId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(LeadId::new(42).unwrap().get(), 42);
    }

    #[test]
    fn id_deserialization_is_validated() {
        let id: LeadId = serde_json::from_str("42").unwrap();
        assert_eq!(id.get(), 42);
        assert!(serde_json::from_str::<OrderId>("0").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }
}
