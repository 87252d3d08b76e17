//! Medication regimen records.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::ids::{MedicationId, UserId};

/// Body of the create-medication call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedication {
    pub user_id: UserId,
    pub drug_name: String,
    /// Display dosage as listed in the catalog, e.g. "0.5 mg".
    pub dosage: String,
    /// e.g. "weekly".
    pub frequency: String,
    pub injection_day: Weekday,
    pub injection_time: NaiveTime,
    pub start_date: NaiveDate,
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

/// A medication regimen: the create request echoed back with an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: MedicationId,
    pub user_id: UserId,
    pub drug_name: String,
    pub dosage: String,
    pub frequency: String,
    pub injection_day: Weekday,
    pub injection_time: NaiveTime,
    pub start_date: NaiveDate,
}

impl Medication {
    /// Build the echoed record for `request` under a freshly assigned id.
    pub fn from_request(id: MedicationId, request: &CreateMedication) -> Self {
        Self {
            id,
            user_id: request.user_id.clone(),
            drug_name: request.drug_name.clone(),
            dosage: request.dosage.clone(),
            frequency: request.frequency.clone(),
            injection_day: request.injection_day,
            injection_time: request.injection_time,
            start_date: request.start_date,
        }
    }
}
