//! Dashboard view model.
//!
//! Loading the dashboard is the one place the client fans out: the summary
//! and the alert list are fetched concurrently and joined before anything is
//! shown. Either failing fails the whole load.

use serde::Serialize;
use tracing::{debug, warn};

use glp_classify::{
    adherence_band, adherence_band_style, alert_priority, priority_style, risk_level, risk_style,
    DisplayStyle,
};
use glp_contracts::{
    alert::Alert,
    clinical::{AdherenceBand, AlertPriority, RiskLevel},
    dashboard::{ActiveMedication, DashboardSummary},
    error::GlpResult,
    user::User,
};
use glp_core::AppContext;

/// An alert paired with its priority bucket and display style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledAlert {
    pub alert: Alert,
    pub priority: AlertPriority,
    pub style: DisplayStyle,
}

impl StyledAlert {
    pub fn new(alert: Alert) -> Self {
        let priority = alert_priority(&alert);
        Self {
            alert,
            priority,
            style: priority_style(priority),
        }
    }
}

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub user: User,
    /// `active_medications[0]` from the summary, if present.
    pub primary_medication: Option<ActiveMedication>,
    pub alerts: Vec<StyledAlert>,
    pub risk: Option<(RiskLevel, DisplayStyle)>,
    pub adherence: Option<(AdherenceBand, DisplayStyle)>,
    pub summary: DashboardSummary,
}

impl DashboardView {
    /// The highest-priority alert, first in backend order on ties.
    pub fn most_urgent(&self) -> Option<&StyledAlert> {
        self.alerts
            .iter()
            .rev()
            .max_by_key(|a| a.priority)
    }
}

/// Load the dashboard for the signed-in user.
///
/// # Errors
///
/// `StateMachineError` if nobody is signed in; otherwise whatever the
/// backend returned for either read.
pub async fn load_dashboard(ctx: &AppContext) -> GlpResult<DashboardView> {
    let user = ctx.require_user()?;
    let backend = ctx.backend();

    let (summary, alerts) = tokio::try_join!(
        backend.get_dashboard(&user.id),
        backend.get_user_alerts(&user.id),
    )?;

    let view = DashboardView {
        primary_medication: summary.primary_medication(),
        risk: summary.risk_score().map(|s| {
            let level = risk_level(s);
            (level, risk_style(level))
        }),
        adherence: summary.adherence_percent().map(|p| {
            let band = adherence_band(p);
            (band, adherence_band_style(band))
        }),
        alerts: alerts.into_iter().map(StyledAlert::new).collect(),
        summary,
        user,
    };

    debug!(
        user_id = %view.user.id,
        alerts = view.alerts.len(),
        has_medication = view.primary_medication.is_some(),
        "dashboard loaded"
    );
    Ok(view)
}

/// Screen-level holder: keeps the last good view and the user-facing error
/// from the last failed refresh.
#[derive(Debug, Default)]
pub struct DashboardScreen {
    view: Option<DashboardView>,
    error: Option<String>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload. On failure the previous view is kept and `error` is set.
    pub async fn refresh(&mut self, ctx: &AppContext) -> Option<&DashboardView> {
        match load_dashboard(ctx).await {
            Ok(view) => {
                self.view = Some(view);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "dashboard load failed");
                self.error = Some(e.user_message("load your dashboard"));
            }
        }
        self.view.as_ref()
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
