//! The classification tables.
//!
//! Every function here is total over its input: closed enums map through a
//! literal `match`, and the only free-text input (the backend's alert
//! severity) falls back to `Info`.

use tracing::debug;

use glp_contracts::clinical::{
    AdherenceBand, AdherenceState, AlertPriority, RiskLevel, SeverityLevel,
};

use crate::palette::{DisplayStyle, Tone};

/// Display style for a self-reported symptom severity.
pub const fn severity_style(level: SeverityLevel) -> DisplayStyle {
    match level {
        SeverityLevel::None => DisplayStyle::new(Tone::Neutral, "remove-circle-outline", "None"),
        SeverityLevel::Mild => DisplayStyle::new(Tone::Success, "happy-outline", "Mild"),
        SeverityLevel::Moderate => DisplayStyle::new(Tone::Caution, "alert-circle-outline", "Moderate"),
        SeverityLevel::Severe => DisplayStyle::new(Tone::Warning, "warning-outline", "Severe"),
        SeverityLevel::VerySevere => DisplayStyle::new(Tone::Error, "close-circle", "Very severe"),
    }
}

/// Display style for a dose adherence state.
pub const fn adherence_style(state: AdherenceState) -> DisplayStyle {
    match state {
        AdherenceState::Adherent => DisplayStyle::new(Tone::Success, "checkmark-circle", "On time"),
        AdherenceState::Delayed => DisplayStyle::new(Tone::Caution, "time-outline", "Delayed"),
        AdherenceState::AtRisk => DisplayStyle::new(Tone::Warning, "alert-circle", "At risk"),
        AdherenceState::Missed => DisplayStyle::new(Tone::Error, "close-circle", "Missed"),
    }
}

/// Display style for an alert priority.
pub const fn priority_style(priority: AlertPriority) -> DisplayStyle {
    match priority {
        AlertPriority::Info => DisplayStyle::new(Tone::Info, "information-circle", "Info"),
        AlertPriority::Advisory => DisplayStyle::new(Tone::Caution, "bulb-outline", "Advisory"),
        AlertPriority::Warning => DisplayStyle::new(Tone::Warning, "warning", "Warning"),
        AlertPriority::Critical => DisplayStyle::new(Tone::Error, "alert", "Critical"),
    }
}

/// Display style for a risk bucket.
pub const fn risk_style(level: RiskLevel) -> DisplayStyle {
    match level {
        RiskLevel::Low => DisplayStyle::new(Tone::Success, "shield-checkmark", "Low risk"),
        RiskLevel::Moderate => DisplayStyle::new(Tone::Caution, "shield-half", "Moderate risk"),
        RiskLevel::Elevated => DisplayStyle::new(Tone::Warning, "shield-outline", "Elevated risk"),
        RiskLevel::High => DisplayStyle::new(Tone::Error, "nuclear", "High risk"),
    }
}

/// Display style for an adherence percentage band.
pub const fn adherence_band_style(band: AdherenceBand) -> DisplayStyle {
    match band {
        AdherenceBand::OnTrack => DisplayStyle::new(Tone::Success, "trending-up", "On track"),
        AdherenceBand::Slipping => DisplayStyle::new(Tone::Warning, "trending-down", "Slipping"),
        AdherenceBand::OffTrack => DisplayStyle::new(Tone::Error, "close-circle", "Off track"),
    }
}

/// Map the backend's severity string onto a priority.
///
/// Exact, case-sensitive match on "Low", "Medium", "High", "Critical";
/// anything else is `Info`.
pub fn map_severity_to_priority(severity: &str) -> AlertPriority {
    match severity {
        "Low" => AlertPriority::Info,
        "Medium" => AlertPriority::Advisory,
        "High" => AlertPriority::Warning,
        "Critical" => AlertPriority::Critical,
        other => {
            debug!(severity = %other, "unrecognized alert severity, using info");
            AlertPriority::Info
        }
    }
}

/// Bucket a 0..=100 risk score. Values above 100 clamp to `High`.
pub const fn risk_level(score: u8) -> RiskLevel {
    match score {
        0..=24 => RiskLevel::Low,
        25..=49 => RiskLevel::Moderate,
        50..=74 => RiskLevel::Elevated,
        _ => RiskLevel::High,
    }
}

/// Bucket an adherence percentage: at least 90 is on track, at least 70 is
/// slipping, anything lower (or NaN) is off track.
pub fn adherence_band(percent: f64) -> AdherenceBand {
    if percent >= 90.0 {
        AdherenceBand::OnTrack
    } else if percent >= 70.0 {
        AdherenceBand::Slipping
    } else {
        AdherenceBand::OffTrack
    }
}
