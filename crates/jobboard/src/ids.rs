//! Identifier newtypes for every stored record.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an id taken from a path segment or request body.
            pub fn parse(raw: &str) -> Result<Self, BoardError> {
                Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| BoardError::bad_request(format!("invalid {} id '{}'", $label, raw)))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user (applicant or recruiter).
    UserId,
    "user"
);
entity_id!(CompanyId, "company");
entity_id!(JobId, "job");
entity_id!(ApplicationId, "application");
