//! # glp-backend
//!
//! Adapters for the [`Backend`](glp_core::traits::Backend) seam.
//!
//! - [`InMemoryBackend`] keeps everything in process memory. It fabricates
//!   ids, can simulate latency, and lets tests inject failures.
//! - [`HttpBackend`] talks JSON over HTTP to a real service.
//!
//! [`build_backend`] picks one from an [`AppConfig`].

pub mod http;
pub mod memory;
pub mod mock_data;

use std::sync::Arc;

use tracing::info;

use glp_config::{AppConfig, BackendKind};
use glp_contracts::error::{GlpError, GlpResult};
use glp_core::traits::{Backend, Clock};

pub use http::HttpBackend;
pub use memory::InMemoryBackend;

/// Construct the adapter selected by `config`.
pub fn build_backend(config: &AppConfig, clock: Arc<dyn Clock>) -> GlpResult<Arc<dyn Backend>> {
    match config.backend.kind {
        BackendKind::Memory => {
            info!(latency_ms = config.memory.latency_ms, "using in-memory backend");
            Ok(Arc::new(
                InMemoryBackend::new(clock)
                    .with_latency(config.memory_latency())
                    .with_sample_alerts(config.memory.sample_alerts),
            ))
        }
        BackendKind::Http => {
            let base_url = config.backend.base_url.as_deref().ok_or_else(|| GlpError::ConfigError {
                reason: "backend.base_url is required for the http backend".to_string(),
            })?;
            info!(base_url = %base_url, "using HTTP backend");
            Ok(Arc::new(HttpBackend::new(base_url, config.timeout())?))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

    use glp_config::AppConfig;
    use glp_contracts::{
        error::GlpError,
        ids::{AlertId, UserId},
        medication::CreateMedication,
        symptom::CreateSymptom,
        user::CreateUser,
    };
    use glp_core::{
        clock::ManualClock,
        traits::{Backend, Operation},
    };

    use super::{build_backend, InMemoryBackend};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 2, 2, 10, 0, 0).unwrap()))
    }

    fn backend() -> InMemoryBackend {
        InMemoryBackend::new(clock())
    }

    fn user_request(name: &str, key: Option<&str>) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            age: 44,
            email: format!("{}@example.com", name.to_lowercase()),
            idempotency_key: key.map(str::to_string),
        }
    }

    fn medication_request(user_id: &UserId, dosage: &str, key: Option<&str>) -> CreateMedication {
        CreateMedication {
            user_id: user_id.clone(),
            drug_name: "Wegovy".to_string(),
            dosage: dosage.to_string(),
            frequency: "weekly".to_string(),
            injection_day: Weekday::Sat,
            injection_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            idempotency_key: key.map(str::to_string),
        }
    }

    // ── Users ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_user_fabricates_id_and_defaults() {
        let backend = backend();
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();

        assert!(!user.id.as_str().is_empty());
        assert!(!user.onboarding_completed);
        assert_eq!(user.created_at, Utc.with_ymd_and_hms(2026, 2, 2, 10, 0, 0).unwrap());
        assert_eq!(backend.user_count(), 1);
    }

    #[tokio::test]
    async fn repeated_idempotency_key_upserts_user() {
        let backend = backend();
        let first = backend.create_user(&user_request("Alex", Some("k1"))).await.unwrap();
        let second = backend.create_user(&user_request("Alexis", Some("k1"))).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Alexis");
        assert_eq!(backend.user_count(), 1);
    }

    #[tokio::test]
    async fn distinct_keys_create_distinct_users() {
        let backend = backend();
        backend.create_user(&user_request("A", Some("k1"))).await.unwrap();
        backend.create_user(&user_request("B", Some("k2"))).await.unwrap();
        assert_eq!(backend.user_count(), 2);
    }

    #[tokio::test]
    async fn complete_onboarding_flags_user() {
        let backend = backend();
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();

        let updated = backend.complete_onboarding(&user.id).await.unwrap().unwrap();
        assert!(updated.onboarding_completed);

        let missing = backend.complete_onboarding(&UserId::new("nobody")).await.unwrap();
        assert!(missing.is_none());
    }

    // ── Medications ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_medication_echoes_request() {
        let backend = backend();
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();
        let med = backend
            .create_medication(&medication_request(&user.id, "1 mg", None))
            .await
            .unwrap();

        assert_eq!(med.user_id, user.id);
        assert_eq!(med.dosage, "1 mg");
        assert_eq!(med.injection_day, Weekday::Sat);
        assert_eq!(backend.medications_for(&user.id).len(), 1);
    }

    #[tokio::test]
    async fn create_medication_for_unknown_user_is_not_found() {
        let backend = backend();
        let result = backend
            .create_medication(&medication_request(&UserId::new("ghost"), "1 mg", None))
            .await;
        assert!(matches!(result, Err(GlpError::NotFound { .. })));
    }

    #[tokio::test]
    async fn repeated_medication_key_updates_in_place() {
        let backend = backend();
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();
        let a = backend
            .create_medication(&medication_request(&user.id, "0.5 mg", Some("m1")))
            .await
            .unwrap();
        let b = backend
            .create_medication(&medication_request(&user.id, "1 mg", Some("m1")))
            .await
            .unwrap();

        assert_eq!(a.id, b.id);
        let stored = backend.medications_for(&user.id);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].dosage, "1 mg");
    }

    // ── Failure injection ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let backend = backend();
        backend.fail_next(Operation::CreateUser, "service unavailable");

        match backend.create_user(&user_request("Alex", None)).await {
            Err(GlpError::BackendRejected { operation, reason }) => {
                assert_eq!(operation, "create_user");
                assert_eq!(reason, "service unavailable");
            }
            other => panic!("expected BackendRejected, got {:?}", other),
        }
        assert!(backend.create_user(&user_request("Alex", None)).await.is_ok());
        assert_eq!(backend.calls(Operation::CreateUser), 2);
        assert_eq!(backend.user_count(), 1);
    }

    // ── Alerts, dashboard, symptoms ───────────────────────────────────────────

    #[tokio::test]
    async fn sample_alerts_are_seeded_for_new_users() {
        let backend = backend().with_sample_alerts(true);
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();

        let alerts = backend.get_user_alerts(&user.id).await.unwrap();
        let severities: Vec<&str> = alerts.iter().map(|a| a.severity.as_str()).collect();
        assert_eq!(severities, vec!["Critical", "High", "Medium", "Low"]);
    }

    #[tokio::test]
    async fn acknowledge_removes_alert() {
        let backend = backend().with_sample_alerts(true);
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();
        let alerts = backend.get_user_alerts(&user.id).await.unwrap();

        backend.acknowledge_alert(&alerts[0].id).await.unwrap();
        assert_eq!(backend.get_user_alerts(&user.id).await.unwrap().len(), alerts.len() - 1);

        let again = backend.acknowledge_alert(&alerts[0].id).await;
        assert!(matches!(again, Err(GlpError::NotFound { .. })));
    }

    #[tokio::test]
    async fn dashboard_lists_first_medication() {
        let backend = backend();
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();
        backend
            .create_medication(&medication_request(&user.id, "0.25 mg", None))
            .await
            .unwrap();

        let summary = backend.get_dashboard(&user.id).await.unwrap();
        let primary = summary.primary_medication().unwrap();
        assert_eq!(primary.drug_name, "Wegovy");
        assert_eq!(primary.dosage, "0.25 mg");
    }

    #[tokio::test]
    async fn dashboard_for_unknown_user_is_not_found() {
        let result = backend().get_dashboard(&UserId::new("ghost")).await;
        assert!(matches!(result, Err(GlpError::NotFound { .. })));
    }

    #[tokio::test]
    async fn symptom_severity_must_be_on_scale() {
        let backend = backend();
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();

        let bad = CreateSymptom {
            user_id: user.id.clone(),
            symptom_type: "nausea".to_string(),
            severity: 11,
            notes: String::new(),
        };
        assert!(matches!(
            backend.create_symptom(&bad).await,
            Err(GlpError::BackendRejected { .. })
        ));

        let good = CreateSymptom { severity: 5, ..bad };
        let symptom = backend.create_symptom(&good).await.unwrap();
        assert_eq!(symptom.severity, 5);
        assert_eq!(backend.symptoms_for(&user.id).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_calls() {
        let backend = backend().with_latency(Duration::from_millis(800));
        let started = tokio::time::Instant::now();
        backend.get_user_alerts(&UserId::new("anyone")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test]
    async fn unknown_alert_id_is_not_found() {
        let result = backend().acknowledge_alert(&AlertId::new("missing")).await;
        assert!(matches!(result, Err(GlpError::NotFound { .. })));
    }

    // ── build_backend ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn build_backend_from_default_config_is_in_memory() {
        let config = AppConfig::default();
        let backend = build_backend(&config, clock()).unwrap();
        let user = backend.create_user(&user_request("Alex", None)).await.unwrap();
        // Default config seeds sample alerts.
        assert_eq!(backend.get_user_alerts(&user.id).await.unwrap().len(), 4);
    }

    #[test]
    fn build_backend_http_requires_valid_url() {
        let config = AppConfig::from_toml_str(
            r#"
            [backend]
            kind = "http"
            base_url = "https://api.example.com/v1/"
            "#,
        )
        .unwrap();
        assert!(build_backend(&config, clock()).is_ok());
    }
}
