//! Sample content for the in-memory adapter.
//!
//! All data in this module is fictional. It gives the dashboard and alert
//! inbox something to show when no real backend is configured.

use glp_contracts::{alert::Alert, ids::AlertId};

fn alert(severity: &str, alert_type: &str, message: &str, recommendation: &str) -> Alert {
    Alert {
        id: AlertId::generate(),
        severity: severity.to_string(),
        alert_type: alert_type.to_string(),
        message: message.to_string(),
        recommendation: recommendation.to_string(),
    }
}

/// One alert per backend severity, most urgent first.
pub fn sample_alerts() -> Vec<Alert> {
    vec![
        alert(
            "Critical",
            "severe_abdominal_pain",
            "Severe abdominal pain radiating to the back was reported after your last dose.",
            "Seek urgent medical care; persistent severe pain can indicate pancreatitis.",
        ),
        alert(
            "High",
            "persistent_vomiting",
            "Vomiting has been logged on three consecutive days.",
            "Contact your provider and keep up fluid intake to avoid dehydration.",
        ),
        alert(
            "Medium",
            "dose_delayed",
            "Your weekly injection is more than two days late.",
            "Take the missed dose if it is within five days of the scheduled day, otherwise skip it.",
        ),
        alert(
            "Low",
            "hydration_reminder",
            "Fluid intake was below target yesterday.",
            "Aim for small, frequent sips of water through the day.",
        ),
    ]
}
