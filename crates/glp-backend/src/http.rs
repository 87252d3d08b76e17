//! HTTP implementation of `Backend`.
//!
//! Maps each call of the backend seam onto a JSON-over-HTTP route under a
//! configured base URL. Create calls carry their idempotency key in an
//! `Idempotency-Key` header so the server can upsert on retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use glp_contracts::{
    alert::Alert,
    dashboard::DashboardSummary,
    error::{GlpError, GlpResult},
    ids::{AlertId, UserId},
    medication::{CreateMedication, Medication},
    symptom::{CreateSymptom, Symptom},
    user::{CreateUser, User},
};
use glp_core::traits::{Backend, Operation};

/// Header carrying the client-generated deduplication key.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Response bodies longer than this are truncated in error messages.
const MAX_ERROR_BODY: usize = 200;

/// A `Backend` that talks to a remote service.
pub struct HttpBackend {
    base: Url,
    client: Client,
}

impl HttpBackend {
    /// Build an adapter for `base_url` with a per-request `timeout`.
    ///
    /// Returns `GlpError::ConfigError` if the URL cannot serve as a base or
    /// the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> GlpResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GlpError::ConfigError {
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Self::with_client(base_url, client)
    }

    /// Build an adapter around an already configured `reqwest::Client`.
    pub fn with_client(base_url: &str, client: Client) -> GlpResult<Self> {
        let base = Url::parse(base_url).map_err(|e| GlpError::ConfigError {
            reason: format!("invalid backend base URL '{}': {}", base_url, e),
        })?;
        if base.cannot_be_a_base() {
            return Err(GlpError::ConfigError {
                reason: format!("backend base URL '{}' cannot carry a path", base_url),
            });
        }
        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Append percent-encoded path `segments` to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> GlpResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GlpError::ConfigError {
                reason: format!("backend base URL '{}' cannot carry a path", self.base),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        idempotency_key: Option<&str>,
    ) -> GlpResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        let mut builder = self.client.request(method, url);
        if let Some(key) = idempotency_key {
            builder = builder.header(IDEMPOTENCY_HEADER, key);
        }
        Ok(builder)
    }

    /// Send `builder` and return the status and body, mapping non-success
    /// statuses other than those in `passthrough` to `BackendRejected`.
    async fn execute(
        &self,
        operation: Operation,
        builder: RequestBuilder,
        passthrough: &[StatusCode],
    ) -> GlpResult<(StatusCode, String)> {
        let response = builder.send().await.map_err(|e| transport(operation, e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport(operation, e))?;

        debug!(operation = %operation, status = status.as_u16(), "backend responded");

        if status.is_success() || passthrough.contains(&status) {
            Ok((status, body))
        } else {
            let err = rejection(operation, status, &body);
            warn!(operation = %operation, error = %err, "backend call rejected");
            Err(err)
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> GlpResult<T> {
        let (_, body) = self.execute(operation, builder, &[]).await?;
        decode(operation, &body)
    }
}

/// Build the error for a non-success response.
pub fn rejection(operation: Operation, status: StatusCode, body: &str) -> GlpError {
    let body = body.trim();
    let reason = if body.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("HTTP {}: {}", status.as_u16(), snippet)
    };
    GlpError::BackendRejected {
        operation: operation.to_string(),
        reason,
    }
}

fn transport(operation: Operation, e: reqwest::Error) -> GlpError {
    GlpError::Transport {
        reason: format!("{} failed: {}", operation, e),
    }
}

fn decode<T: DeserializeOwned>(operation: Operation, body: &str) -> GlpResult<T> {
    serde_json::from_str(body).map_err(|e| GlpError::Transport {
        reason: format!("{} returned an unreadable body: {}", operation, e),
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn create_user(&self, request: &CreateUser) -> GlpResult<User> {
        let builder = self
            .request(Method::POST, &["users"], request.idempotency_key.as_deref())?
            .json(request);
        self.fetch(Operation::CreateUser, builder).await
    }

    async fn create_medication(&self, request: &CreateMedication) -> GlpResult<Medication> {
        let builder = self
            .request(Method::POST, &["medications"], request.idempotency_key.as_deref())?
            .json(request);
        self.fetch(Operation::CreateMedication, builder).await
    }

    async fn complete_onboarding(&self, user_id: &UserId) -> GlpResult<Option<User>> {
        let builder = self.request(
            Method::POST,
            &["users", user_id.as_str(), "onboarding", "complete"],
            None,
        )?;
        let (status, body) = self
            .execute(Operation::CompleteOnboarding, builder, &[StatusCode::NOT_FOUND])
            .await?;

        if status == StatusCode::NOT_FOUND || body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        decode(Operation::CompleteOnboarding, &body).map(Some)
    }

    async fn seed_education(&self, user_id: &UserId) -> GlpResult<()> {
        let builder = self.request(
            Method::POST,
            &["users", user_id.as_str(), "education", "seed"],
            None,
        )?;
        self.execute(Operation::SeedEducation, builder, &[]).await?;
        Ok(())
    }

    async fn get_dashboard(&self, user_id: &UserId) -> GlpResult<DashboardSummary> {
        let builder = self.request(Method::GET, &["users", user_id.as_str(), "dashboard"], None)?;
        self.fetch(Operation::GetDashboard, builder).await
    }

    async fn get_user_alerts(&self, user_id: &UserId) -> GlpResult<Vec<Alert>> {
        let builder = self.request(Method::GET, &["users", user_id.as_str(), "alerts"], None)?;
        self.fetch(Operation::GetUserAlerts, builder).await
    }

    async fn acknowledge_alert(&self, alert_id: &AlertId) -> GlpResult<()> {
        let builder = self.request(
            Method::POST,
            &["alerts", alert_id.as_str(), "acknowledge"],
            None,
        )?;
        self.execute(Operation::AcknowledgeAlert, builder, &[]).await?;
        Ok(())
    }

    async fn create_symptom(&self, request: &CreateSymptom) -> GlpResult<Symptom> {
        let builder = self.request(Method::POST, &["symptoms"], None)?.json(request);
        self.fetch(Operation::CreateSymptom, builder).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, post},
        Json, Router,
    };
    use chrono::{NaiveDate, NaiveTime, Weekday};
    use reqwest::{Client, StatusCode};
    use serde_json::{json, Value};

    use glp_contracts::{
        error::GlpError,
        ids::{AlertId, UserId},
        medication::CreateMedication,
        user::CreateUser,
    };
    use glp_core::traits::{Backend, Operation};

    use super::{rejection, HttpBackend, IDEMPOTENCY_HEADER};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn user_json(id: &str, name: &str, completed: bool) -> Value {
        json!({
            "id": id,
            "name": name,
            "age": 40,
            "email": "alex@example.com",
            "onboardingCompleted": completed,
            "createdAt": "2026-02-02T10:00:00Z",
        })
    }

    async fn create_user(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let id = headers
            .get(IDEMPOTENCY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|k| format!("user-{}", k))
            .unwrap_or_else(|| "user-unkeyed".to_string());
        let name = body["name"].as_str().unwrap_or_default().to_string();
        Json(user_json(&id, &name, false))
    }

    async fn complete(Path(id): Path<String>) -> Result<Json<Value>, AxumStatus> {
        if id == "missing" {
            Err(AxumStatus::NOT_FOUND)
        } else {
            Ok(Json(user_json(&id, "Alex", true)))
        }
    }

    async fn alerts(Path(_id): Path<String>) -> Json<Value> {
        Json(json!([{
            "id": "a1",
            "severity": "High",
            "alert_type": "persistent_vomiting",
            "message": "Vomiting logged three days running.",
            "recommendation": "Contact your provider.",
        }]))
    }

    async fn acknowledge(Path(_id): Path<String>) -> AxumStatus {
        AxumStatus::NO_CONTENT
    }

    async fn medications() -> (AxumStatus, &'static str) {
        (AxumStatus::INTERNAL_SERVER_ERROR, "database unavailable")
    }

    async fn spawn_server() -> SocketAddr {
        let app = Router::new()
            .route("/api/users", post(create_user))
            .route("/api/users/:id/onboarding/complete", post(complete))
            .route("/api/users/:id/alerts", get(alerts))
            .route("/api/alerts/:id/acknowledge", post(acknowledge))
            .route("/api/medications", post(medications));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn backend_for(addr: SocketAddr) -> HttpBackend {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpBackend::with_client(&format!("http://{}/api/", addr), client).unwrap()
    }

    // ── URL building ──────────────────────────────────────────────────────────

    #[test]
    fn endpoint_appends_segments_after_trailing_slash() {
        let backend = HttpBackend::with_client("https://api.example.com/v1/", Client::new()).unwrap();
        let url = backend.endpoint(&["users", "u1", "dashboard"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/users/u1/dashboard");
    }

    #[test]
    fn endpoint_without_trailing_slash_keeps_base_path() {
        let backend = HttpBackend::with_client("https://api.example.com/v1", Client::new()).unwrap();
        let url = backend.endpoint(&["alerts"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/alerts");
    }

    #[test]
    fn endpoint_escapes_identifiers() {
        let backend = HttpBackend::with_client("https://api.example.com", Client::new()).unwrap();
        let url = backend.endpoint(&["users", "a/b", "alerts"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users/a%2Fb/alerts");
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        assert!(matches!(
            HttpBackend::with_client("not a url", Client::new()),
            Err(GlpError::ConfigError { .. })
        ));
        assert!(matches!(
            HttpBackend::with_client("mailto:care@example.com", Client::new()),
            Err(GlpError::ConfigError { .. })
        ));
    }

    #[test]
    fn rejection_includes_status_and_truncated_body() {
        let long = "x".repeat(500);
        match rejection(Operation::GetDashboard, StatusCode::BAD_GATEWAY, &long) {
            GlpError::BackendRejected { operation, reason } => {
                assert_eq!(operation, "get_dashboard");
                assert!(reason.starts_with("HTTP 502: "));
                assert_eq!(reason.len(), "HTTP 502: ".len() + 200);
            }
            other => panic!("expected BackendRejected, got {:?}", other),
        }
    }

    #[test]
    fn rejection_with_empty_body_is_status_only() {
        match rejection(Operation::CreateUser, StatusCode::SERVICE_UNAVAILABLE, "  ") {
            GlpError::BackendRejected { reason, .. } => assert_eq!(reason, "HTTP 503"),
            other => panic!("expected BackendRejected, got {:?}", other),
        }
    }

    // ── Round trips ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_user_sends_idempotency_key() {
        let backend = backend_for(spawn_server().await);
        let request = CreateUser {
            name: "Alex".to_string(),
            age: 40,
            email: "alex@example.com".to_string(),
            idempotency_key: Some("abc123".to_string()),
        };
        let user = backend.create_user(&request).await.unwrap();
        assert_eq!(user.id.as_str(), "user-abc123");
        assert_eq!(user.name, "Alex");
        assert!(!user.onboarding_completed);
    }

    #[tokio::test]
    async fn complete_onboarding_maps_404_to_none() {
        let backend = backend_for(spawn_server().await);

        let done = backend.complete_onboarding(&UserId::new("u1")).await.unwrap();
        assert!(done.unwrap().onboarding_completed);

        let missing = backend.complete_onboarding(&UserId::new("missing")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn alerts_decode_and_acknowledge_succeeds() {
        let backend = backend_for(spawn_server().await);

        let alerts = backend.get_user_alerts(&UserId::new("u1")).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, "High");
        assert_eq!(alerts[0].id, AlertId::new("a1"));

        backend.acknowledge_alert(&alerts[0].id).await.unwrap();
    }

    #[tokio::test]
    async fn server_error_becomes_backend_rejected() {
        let backend = backend_for(spawn_server().await);
        let request = CreateMedication {
            user_id: UserId::new("u1"),
            drug_name: "Ozempic".to_string(),
            dosage: "0.5 mg".to_string(),
            frequency: "weekly".to_string(),
            injection_day: Weekday::Mon,
            injection_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            idempotency_key: None,
        };
        match backend.create_medication(&request).await {
            Err(GlpError::BackendRejected { operation, reason }) => {
                assert_eq!(operation, "create_medication");
                assert_eq!(reason, "HTTP 500: database unavailable");
            }
            other => panic!("expected BackendRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unrouted_path_is_rejected() {
        let backend = backend_for(spawn_server().await);
        let result = backend.get_dashboard(&UserId::new("u1")).await;
        assert!(matches!(result, Err(GlpError::BackendRejected { .. })));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = backend_for(addr);
        let result = backend.get_user_alerts(&UserId::new("u1")).await;
        assert!(matches!(result, Err(GlpError::Transport { .. })));
    }
}
