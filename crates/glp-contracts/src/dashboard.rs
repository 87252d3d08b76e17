//! The dashboard summary.
//!
//! The backend owns this shape and the client reads it loosely: only the
//! first active medication and a couple of optional scores are consumed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque summary object returned by `getDashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardSummary(pub Value);

/// The `{drug_name, dosage}` pair the dashboard header shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMedication {
    pub drug_name: String,
    pub dosage: String,
}

impl DashboardSummary {
    /// `active_medications[0].{drug_name,dosage}`, if both are strings.
    pub fn primary_medication(&self) -> Option<ActiveMedication> {
        let first = self.0.get("active_medications")?.get(0)?;
        Some(ActiveMedication {
            drug_name: first.get("drug_name")?.as_str()?.to_string(),
            dosage: first.get("dosage")?.as_str()?.to_string(),
        })
    }

    /// Optional `risk_score` in 0..=100.
    pub fn risk_score(&self) -> Option<u8> {
        self.0
            .get("risk_score")
            .and_then(Value::as_u64)
            .map(|v| v.min(100) as u8)
    }

    /// Optional `adherence_percent`.
    pub fn adherence_percent(&self) -> Option<f64> {
        self.0.get("adherence_percent").and_then(Value::as_f64)
    }
}
