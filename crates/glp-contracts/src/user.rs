//! User account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A user account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: u32,
    pub email: String,
    /// False until `completeOnboarding` has been called for this user.
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of the create-user call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub age: u32,
    pub email: String,
    /// Deduplication key. Travels out of band (a header on HTTP).
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}
