//! Identifier newtypes.
//!
//! Every entity the backend collaborator hands out is keyed by an opaque
//! string. The client never parses ids; it only echoes them back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares a string-backed identifier with `new`, `as_str` and `Display`.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Fabricate a fresh random id (UUID v4).
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifies a user account.
    UserId
);
string_id!(
    /// Identifies one medication regimen belonging to a user.
    MedicationId
);
string_id!(
    /// Identifies a backend-raised alert.
    AlertId
);
string_id!(
    /// Identifies a logged symptom entry.
    SymptomId
);

/// Client-generated identifier for one onboarding submission attempt series.
///
/// Stays the same across retries so the backend can deduplicate creates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub uuid::Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
