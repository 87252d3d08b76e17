//! Core trait definitions.
//!
//! Two seams separate the client logic from the outside world:
//!
//! - `Backend`: the data collaborator (HTTP service or in-memory stand-in)
//! - `Clock`: the source of "now", so countdowns and ages are testable
//!
//! Screens and the onboarding wizard only ever talk to these traits.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use glp_contracts::{
    alert::Alert,
    dashboard::DashboardSummary,
    error::GlpResult,
    ids::{AlertId, UserId},
    medication::{CreateMedication, Medication},
    symptom::{CreateSymptom, Symptom},
    user::{CreateUser, User},
};

/// Names every call on the [`Backend`] seam.
///
/// Used in error messages, log fields, and by adapters that need to key
/// behaviour per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateUser,
    CreateMedication,
    CompleteOnboarding,
    SeedEducation,
    GetDashboard,
    GetUserAlerts,
    AcknowledgeAlert,
    CreateSymptom,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::CreateMedication => "create_medication",
            Self::CompleteOnboarding => "complete_onboarding",
            Self::SeedEducation => "seed_education",
            Self::GetDashboard => "get_dashboard",
            Self::GetUserAlerts => "get_user_alerts",
            Self::AcknowledgeAlert => "acknowledge_alert",
            Self::CreateSymptom => "create_symptom",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The backend collaborator.
///
/// Implementations must honour the call shapes below so a real service can
/// replace the in-memory adapter without touching screens. Every method may
/// fail with `GlpError::BackendRejected` or `GlpError::Transport`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Create a user account. The returned user has
    /// `onboarding_completed == false`.
    ///
    /// When `request.idempotency_key` is set, a repeated call with the same
    /// key is an upsert: it overwrites the fields of the record the first
    /// call created and returns that record under its original id. Callers
    /// re-send an edited request under the same key to correct it.
    async fn create_user(&self, request: &CreateUser) -> GlpResult<User>;

    /// Create a medication regimen for an existing user. Echoes the request
    /// with an id. Same idempotency contract as `create_user`.
    async fn create_medication(&self, request: &CreateMedication) -> GlpResult<Medication>;

    /// Mark onboarding complete. `Ok(None)` when the user does not exist.
    async fn complete_onboarding(&self, user_id: &UserId) -> GlpResult<Option<User>>;

    /// Seed the user's education content. No-op unless the backend has
    /// something to seed.
    async fn seed_education(&self, _user_id: &UserId) -> GlpResult<()> {
        Ok(())
    }

    /// Fetch the dashboard summary for a user.
    async fn get_dashboard(&self, user_id: &UserId) -> GlpResult<DashboardSummary>;

    /// Fetch all unacknowledged alerts for a user.
    async fn get_user_alerts(&self, user_id: &UserId) -> GlpResult<Vec<Alert>>;

    /// Acknowledge an alert. The caller removes it from its local list.
    async fn acknowledge_alert(&self, alert_id: &AlertId) -> GlpResult<()>;

    /// Log a symptom. Echoes the request with an id.
    async fn create_symptom(&self, request: &CreateSymptom) -> GlpResult<Symptom>;
}

/// A source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
