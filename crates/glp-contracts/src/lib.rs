//! # glp-contracts
//!
//! Shared types, call shapes, and error contracts for the GLP-1 monitoring
//! client.
//!
//! Every crate in the workspace imports from here. No business logic lives
//! in this crate, only data definitions, the severity score mapping, and
//! error types.

pub mod alert;
pub mod clinical;
pub mod dashboard;
pub mod error;
pub mod ids;
pub mod medication;
pub mod symptom;
pub mod user;

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
    use serde_json::json;

    use super::*;
    use clinical::{HeightUnit, SeverityLevel, WeightUnit};
    use dashboard::DashboardSummary;
    use error::GlpError;
    use ids::{SubmissionId, UserId};
    use medication::CreateMedication;
    use user::User;

    // ── SeverityLevel score mapping ──────────────────────────────────────────

    #[test]
    fn severity_scores_match_backend_scale() {
        let scores: Vec<u8> = SeverityLevel::ALL.iter().map(|s| s.score()).collect();
        assert_eq!(scores, vec![1, 3, 5, 8, 10]);
    }

    #[test]
    fn severity_from_score_inverts_anchor_points() {
        for level in SeverityLevel::ALL {
            assert_eq!(SeverityLevel::from_score(level.score()), level);
        }
        assert_eq!(SeverityLevel::from_score(0), SeverityLevel::None);
        assert_eq!(SeverityLevel::from_score(6), SeverityLevel::Moderate);
        assert_eq!(SeverityLevel::from_score(42), SeverityLevel::VerySevere);
    }

    #[test]
    fn severity_serializes_camel_case() {
        let json = serde_json::to_string(&SeverityLevel::VerySevere).unwrap();
        assert_eq!(json, "\"verySevere\"");
    }

    // ── Units ────────────────────────────────────────────────────────────────

    #[test]
    fn unit_conversions() {
        assert!((HeightUnit::Inches.to_cm(70.0) - 177.8).abs() < 1e-9);
        assert!((WeightUnit::Pounds.to_kg(200.0) - 90.718_474).abs() < 1e-6);
        assert_eq!(HeightUnit::Centimeters.toggled(), HeightUnit::Inches);
        assert_eq!(WeightUnit::Pounds.toggled(), WeightUnit::Kilograms);
    }

    // ── Wire shapes ──────────────────────────────────────────────────────────

    #[test]
    fn user_uses_camel_case_fields() {
        let user = User {
            id: UserId::new("u-1"),
            name: "Dana".to_string(),
            age: 41,
            email: "dana@example.com".to_string(),
            onboarding_completed: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], "u-1");
        assert_eq!(value["onboardingCompleted"], false);
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn idempotency_key_never_goes_into_the_body() {
        let request = CreateMedication {
            user_id: UserId::new("u-1"),
            drug_name: "Ozempic".to_string(),
            dosage: "0.5 mg".to_string(),
            frequency: "weekly".to_string(),
            injection_day: Weekday::Mon,
            injection_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            idempotency_key: Some("abc".to_string()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("idempotencyKey").is_none());
        assert_eq!(value["drugName"], "Ozempic");
        assert_eq!(value["userId"], "u-1");
    }

    // ── DashboardSummary ─────────────────────────────────────────────────────

    #[test]
    fn dashboard_primary_medication_reads_first_entry() {
        let summary = DashboardSummary(json!({
            "active_medications": [
                { "drug_name": "Mounjaro", "dosage": "5 mg" },
                { "drug_name": "Other", "dosage": "1 mg" }
            ],
            "risk_score": 140,
            "adherence_percent": 87.5
        }));
        let med = summary.primary_medication().unwrap();
        assert_eq!(med.drug_name, "Mounjaro");
        assert_eq!(med.dosage, "5 mg");
        assert_eq!(summary.risk_score(), Some(100));
        assert_eq!(summary.adherence_percent(), Some(87.5));
    }

    #[test]
    fn dashboard_missing_fields_are_none() {
        let summary = DashboardSummary(json!({ "active_medications": [] }));
        assert!(summary.primary_medication().is_none());
        assert!(summary.risk_score().is_none());
    }

    // ── SubmissionId ─────────────────────────────────────────────────────────

    #[test]
    fn submission_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| SubmissionId::new().to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── GlpError ─────────────────────────────────────────────────────────────

    #[test]
    fn backend_rejected_display() {
        let err = GlpError::BackendRejected {
            operation: "create_medication".to_string(),
            reason: "HTTP 500".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("create_medication"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn user_message_is_generic_for_backend_errors() {
        let err = GlpError::Transport { reason: "timed out".to_string() };
        assert_eq!(
            err.user_message("load your dashboard"),
            "Failed to load your dashboard. Please try again."
        );
        assert!(err.is_backend_failure());
    }

    #[test]
    fn user_message_passes_validation_reason_through() {
        let err = GlpError::Validation { reason: "Please enter your name.".to_string() };
        assert_eq!(err.user_message("save"), "Please enter your name.");
        assert!(!err.is_backend_failure());
    }

    #[test]
    fn not_found_display() {
        let err = GlpError::NotFound { entity: "alert".to_string(), id: "a-9".to_string() };
        assert_eq!(err.to_string(), "alert 'a-9' not found");
    }
}
