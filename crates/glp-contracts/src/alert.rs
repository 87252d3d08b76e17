//! Backend-raised alerts.

use serde::{Deserialize, Serialize};

use crate::ids::AlertId;

/// One alert as delivered by `getUserAlerts`.
///
/// `severity` is kept verbatim. The backend is expected to send one of
/// "Low", "Medium", "High" or "Critical", but any string is accepted and
/// folded into a priority by the classification tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub severity: String,
    pub alert_type: String,
    pub message: String,
    pub recommendation: String,
}
