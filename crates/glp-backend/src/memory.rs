//! In-memory implementation of `Backend`.
//!
//! `InMemoryBackend` stands in for a real service in tests and the demo. It
//! fabricates ids, keeps everything in a `Mutex`-guarded map, and is lost
//! when the process exits.
//!
//! Creates honour idempotency keys with upsert semantics: a repeated key
//! updates and returns the record the first call created. Tests can inject
//! one-shot failures per operation with [`InMemoryBackend::fail_next`].

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use glp_contracts::{
    alert::Alert,
    dashboard::DashboardSummary,
    error::{GlpError, GlpResult},
    ids::{AlertId, MedicationId, SymptomId, UserId},
    medication::{CreateMedication, Medication},
    symptom::{CreateSymptom, Symptom},
    user::{CreateUser, User},
};
use glp_core::traits::{Backend, Clock, Operation};

use crate::mock_data::sample_alerts;

// ── Internal mutable state ────────────────────────────────────────────────────

/// What an idempotency key resolved to the first time it was seen.
#[derive(Debug, Clone)]
enum KeyedRecord {
    User(UserId),
    Medication(MedicationId),
}

#[derive(Default)]
pub(crate) struct MemoryState {
    pub(crate) users: HashMap<UserId, User>,
    /// Insertion order is preserved so "first active medication" is stable.
    pub(crate) medications: Vec<Medication>,
    pub(crate) alerts: HashMap<UserId, Vec<Alert>>,
    pub(crate) symptoms: Vec<Symptom>,
    keys: HashMap<String, KeyedRecord>,
    injected: HashMap<Operation, String>,
    calls: HashMap<Operation, usize>,
}

// ── Public adapter ────────────────────────────────────────────────────────────

/// A process-local backend.
pub struct InMemoryBackend {
    clock: Arc<dyn Clock>,
    latency: Duration,
    sample_alerts: bool,
    pub(crate) state: Arc<Mutex<MemoryState>>,
}

impl InMemoryBackend {
    /// An empty backend with no latency and no sample alerts.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            latency: Duration::ZERO,
            sample_alerts: false,
            state: Arc::new(Mutex::new(MemoryState::default())),
        }
    }

    /// Delay every call by `latency` to mimic a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Seed [`sample_alerts`] for every user created from now on.
    pub fn with_sample_alerts(mut self, enabled: bool) -> Self {
        self.sample_alerts = enabled;
        self
    }

    /// Make the next call to `operation` fail with `BackendRejected`.
    pub fn fail_next(&self, operation: Operation, reason: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.injected.insert(operation, reason.into());
        }
    }

    /// How many times `operation` has been called, including failed calls.
    pub fn calls(&self, operation: Operation) -> usize {
        self.state
            .lock()
            .map(|s| s.calls.get(&operation).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().map(|s| s.users.len()).unwrap_or(0)
    }

    pub fn medications_for(&self, user_id: &UserId) -> Vec<Medication> {
        self.state
            .lock()
            .map(|s| {
                s.medications
                    .iter()
                    .filter(|m| &m.user_id == user_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn symptoms_for(&self, user_id: &UserId) -> Vec<Symptom> {
        self.state
            .lock()
            .map(|s| s.symptoms.iter().filter(|x| &x.user_id == user_id).cloned().collect())
            .unwrap_or_default()
    }

    /// Replace a user's alert list. Used to script inbox contents.
    pub fn set_alerts(&self, user_id: &UserId, alerts: Vec<Alert>) {
        if let Ok(mut state) = self.state.lock() {
            state.alerts.insert(user_id.clone(), alerts);
        }
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Common prologue for every call: simulated latency, call accounting,
    /// and injected failures. Returns the locked state on success.
    async fn enter(&self, operation: Operation) -> GlpResult<MutexGuard<'_, MemoryState>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.state.lock().map_err(|e| GlpError::BackendRejected {
            operation: operation.to_string(),
            reason: format!("backend state lock poisoned: {}", e),
        })?;

        *state.calls.entry(operation).or_insert(0) += 1;

        if let Some(reason) = state.injected.remove(&operation) {
            warn!(operation = %operation, reason = %reason, "injected backend failure");
            return Err(GlpError::BackendRejected {
                operation: operation.to_string(),
                reason,
            });
        }

        debug!(operation = %operation, "in-memory backend call");
        Ok(state)
    }

    fn user_not_found(user_id: &UserId) -> GlpError {
        GlpError::NotFound {
            entity: "user".to_string(),
            id: user_id.to_string(),
        }
    }
}

// ── Backend impl ──────────────────────────────────────────────────────────────

#[async_trait]
impl Backend for InMemoryBackend {
    async fn create_user(&self, request: &CreateUser) -> GlpResult<User> {
        let now = self.clock.now();
        let mut state = self.enter(Operation::CreateUser).await?;

        let existing = request
            .idempotency_key
            .as_ref()
            .and_then(|key| match state.keys.get(key) {
                Some(KeyedRecord::User(id)) => Some(id.clone()),
                _ => None,
            });

        if let Some(id) = existing {
            if let Some(user) = state.users.get_mut(&id) {
                user.name = request.name.clone();
                user.age = request.age;
                user.email = request.email.clone();
                debug!(user_id = %id, "create_user replayed idempotency key, updated in place");
                return Ok(user.clone());
            }
        }

        let user = User {
            id: UserId::generate(),
            name: request.name.clone(),
            age: request.age,
            email: request.email.clone(),
            onboarding_completed: false,
            created_at: now,
        };

        if let Some(key) = &request.idempotency_key {
            state.keys.insert(key.clone(), KeyedRecord::User(user.id.clone()));
        }
        if self.sample_alerts {
            state.alerts.insert(user.id.clone(), sample_alerts());
        }
        state.users.insert(user.id.clone(), user.clone());

        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn create_medication(&self, request: &CreateMedication) -> GlpResult<Medication> {
        let mut state = self.enter(Operation::CreateMedication).await?;

        if !state.users.contains_key(&request.user_id) {
            return Err(Self::user_not_found(&request.user_id));
        }

        let existing = request
            .idempotency_key
            .as_ref()
            .and_then(|key| match state.keys.get(key) {
                Some(KeyedRecord::Medication(id)) => Some(id.clone()),
                _ => None,
            });

        if let Some(id) = existing {
            if let Some(slot) = state.medications.iter_mut().find(|m| m.id == id) {
                *slot = Medication::from_request(id, request);
                debug!(medication_id = %slot.id, "create_medication replayed idempotency key");
                return Ok(slot.clone());
            }
        }

        let medication = Medication::from_request(MedicationId::generate(), request);
        if let Some(key) = &request.idempotency_key {
            state
                .keys
                .insert(key.clone(), KeyedRecord::Medication(medication.id.clone()));
        }
        state.medications.push(medication.clone());

        info!(
            medication_id = %medication.id,
            user_id = %medication.user_id,
            drug = %medication.drug_name,
            "medication created"
        );
        Ok(medication)
    }

    async fn complete_onboarding(&self, user_id: &UserId) -> GlpResult<Option<User>> {
        let mut state = self.enter(Operation::CompleteOnboarding).await?;
        Ok(state.users.get_mut(user_id).map(|user| {
            user.onboarding_completed = true;
            user.clone()
        }))
    }

    async fn seed_education(&self, _user_id: &UserId) -> GlpResult<()> {
        self.enter(Operation::SeedEducation).await?;
        Ok(())
    }

    async fn get_dashboard(&self, user_id: &UserId) -> GlpResult<DashboardSummary> {
        let state = self.enter(Operation::GetDashboard).await?;

        let user = state
            .users
            .get(user_id)
            .ok_or_else(|| Self::user_not_found(user_id))?;

        let active: Vec<_> = state
            .medications
            .iter()
            .filter(|m| &m.user_id == user_id)
            .map(|m| {
                json!({
                    "id": m.id,
                    "drug_name": m.drug_name,
                    "dosage": m.dosage,
                    "frequency": m.frequency,
                    "injection_day": m.injection_day.to_string(),
                    "injection_time": m.injection_time.format("%H:%M").to_string(),
                })
            })
            .collect();

        let open_alerts = state.alerts.get(user_id).map(Vec::len).unwrap_or(0);
        let symptom_count = state.symptoms.iter().filter(|s| &s.user_id == user_id).count();

        Ok(DashboardSummary(json!({
            "user_id": user.id,
            "name": user.name,
            "onboarding_completed": user.onboarding_completed,
            "active_medications": active,
            "open_alerts": open_alerts,
            "symptoms_logged": symptom_count,
        })))
    }

    async fn get_user_alerts(&self, user_id: &UserId) -> GlpResult<Vec<Alert>> {
        let state = self.enter(Operation::GetUserAlerts).await?;
        Ok(state.alerts.get(user_id).cloned().unwrap_or_default())
    }

    async fn acknowledge_alert(&self, alert_id: &AlertId) -> GlpResult<()> {
        let mut state = self.enter(Operation::AcknowledgeAlert).await?;

        for alerts in state.alerts.values_mut() {
            if let Some(pos) = alerts.iter().position(|a| &a.id == alert_id) {
                alerts.remove(pos);
                info!(alert_id = %alert_id, "alert acknowledged");
                return Ok(());
            }
        }

        Err(GlpError::NotFound {
            entity: "alert".to_string(),
            id: alert_id.to_string(),
        })
    }

    async fn create_symptom(&self, request: &CreateSymptom) -> GlpResult<Symptom> {
        let now = self.clock.now();
        let mut state = self.enter(Operation::CreateSymptom).await?;

        if !(1..=10).contains(&request.severity) {
            return Err(GlpError::BackendRejected {
                operation: Operation::CreateSymptom.to_string(),
                reason: format!("severity {} is outside 1..=10", request.severity),
            });
        }
        if !state.users.contains_key(&request.user_id) {
            return Err(Self::user_not_found(&request.user_id));
        }

        let symptom = Symptom {
            id: SymptomId::generate(),
            user_id: request.user_id.clone(),
            symptom_type: request.symptom_type.clone(),
            severity: request.severity,
            notes: request.notes.clone(),
            recorded_at: now,
        };
        state.symptoms.push(symptom.clone());
        Ok(symptom)
    }
}
