//! Symptom log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{SymptomId, UserId};

/// Body of the create-symptom call.
///
/// `severity` is on the backend's 1..=10 scale; screens derive it from
/// [`crate::clinical::SeverityLevel::score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSymptom {
    pub user_id: UserId,
    pub symptom_type: String,
    pub severity: u8,
    pub notes: String,
}

/// A logged symptom: the request echoed back with an id and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    pub id: SymptomId,
    pub user_id: UserId,
    pub symptom_type: String,
    pub severity: u8,
    pub notes: String,
    pub recorded_at: DateTime<Utc>,
}
