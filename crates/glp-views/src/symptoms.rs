//! Symptom logging.
//!
//! Screens pick a `SeverityLevel`; the backend wants 1..=10. The conversion
//! happens here and only here, through `SeverityLevel::score`.

use serde::Serialize;
use tracing::info;

use glp_classify::{severity_style, DisplayStyle};
use glp_contracts::{
    clinical::SeverityLevel,
    error::{GlpError, GlpResult},
    ids::UserId,
    symptom::{CreateSymptom, Symptom},
};
use glp_core::AppContext;

/// What the user filled in on the symptom form.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomEntry {
    pub symptom_type: String,
    pub severity: SeverityLevel,
    pub notes: String,
}

impl SymptomEntry {
    pub fn new(symptom_type: impl Into<String>, severity: SeverityLevel) -> Self {
        Self {
            symptom_type: symptom_type.into(),
            severity,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// The create-symptom body for `user_id`.
    pub fn to_request(&self, user_id: &UserId) -> GlpResult<CreateSymptom> {
        let symptom_type = self.symptom_type.trim();
        if symptom_type.is_empty() {
            return Err(GlpError::Validation {
                reason: "Please choose a symptom.".to_string(),
            });
        }
        Ok(CreateSymptom {
            user_id: user_id.clone(),
            symptom_type: symptom_type.to_string(),
            severity: self.severity.score(),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// A logged symptom with its severity bucket for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedSymptom {
    pub symptom: Symptom,
    pub level: SeverityLevel,
    pub style: DisplayStyle,
}

impl LoggedSymptom {
    pub fn new(symptom: Symptom) -> Self {
        let level = SeverityLevel::from_score(symptom.severity);
        Self {
            symptom,
            level,
            style: severity_style(level),
        }
    }
}

/// Log `entry` for the signed-in user.
pub async fn log_symptom(ctx: &AppContext, entry: &SymptomEntry) -> GlpResult<LoggedSymptom> {
    let user = ctx.require_user()?;
    let request = entry.to_request(&user.id)?;
    let symptom = ctx.backend().create_symptom(&request).await?;
    info!(
        user_id = %user.id,
        symptom = %symptom.symptom_type,
        severity = symptom.severity,
        "symptom logged"
    );
    Ok(LoggedSymptom::new(symptom))
}
