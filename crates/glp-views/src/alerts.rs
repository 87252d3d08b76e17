//! Alert inbox.
//!
//! Acknowledging an alert tells the backend and then drops the alert from the
//! local list. The list is only touched after the backend accepts.

use tracing::{info, warn};

use glp_contracts::{
    error::{GlpError, GlpResult},
    ids::{AlertId, UserId},
};
use glp_core::AppContext;

use crate::dashboard::StyledAlert;

pub struct AlertInbox {
    user_id: UserId,
    alerts: Vec<StyledAlert>,
    error: Option<String>,
}

impl AlertInbox {
    /// Fetch the signed-in user's alerts.
    pub async fn load(ctx: &AppContext) -> GlpResult<Self> {
        let user = ctx.require_user()?;
        let alerts = ctx.backend().get_user_alerts(&user.id).await?;
        Ok(Self::from_alerts(
            user.id,
            alerts.into_iter().map(StyledAlert::new).collect(),
        ))
    }

    pub fn from_alerts(user_id: UserId, alerts: Vec<StyledAlert>) -> Self {
        Self { user_id, alerts, error: None }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn alerts(&self) -> &[StyledAlert] {
        &self.alerts
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// The message from the last failed acknowledge, cleared on success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Acknowledge `alert_id` and remove it locally.
    ///
    /// On failure the list is left as it was and [`error`](Self::error)
    /// carries the user-facing message.
    pub async fn acknowledge(&mut self, ctx: &AppContext, alert_id: &AlertId) -> GlpResult<()> {
        let Some(pos) = self.alerts.iter().position(|a| &a.alert.id == alert_id) else {
            return Err(GlpError::NotFound {
                entity: "alert".to_string(),
                id: alert_id.to_string(),
            });
        };

        match ctx.backend().acknowledge_alert(alert_id).await {
            Ok(()) => {
                self.alerts.remove(pos);
                self.error = None;
                info!(alert_id = %alert_id, remaining = self.alerts.len(), "alert acknowledged");
                Ok(())
            }
            Err(e) => {
                warn!(alert_id = %alert_id, error = %e, "acknowledge failed");
                self.error = Some(e.user_message("acknowledge alert"));
                Err(e)
            }
        }
    }
}
