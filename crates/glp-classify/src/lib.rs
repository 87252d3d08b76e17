//! # glp-classify
//!
//! Clinical classification tables for the GLP-1 monitoring client.
//!
//! Each table maps a closed clinical value to a [`DisplayStyle`]: a colour
//! triple drawn from a shared [`Tone`] palette plus an icon name and label.
//! Screens never choose colours themselves; they classify and render.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use glp_classify::{alert_style, severity_style};
//!
//! let style = alert_style(&alert);
//! println!("{} {}", style.icon, style.label);
//! ```

pub mod palette;
pub mod tables;

pub use palette::{DisplayStyle, Palette, Tone};
pub use tables::{
    adherence_band, adherence_band_style, adherence_style, map_severity_to_priority,
    priority_style, risk_level, risk_style, severity_style,
};

use glp_contracts::{alert::Alert, clinical::AlertPriority};

/// The priority bucket for a backend alert's severity string.
pub fn alert_priority(alert: &Alert) -> AlertPriority {
    map_severity_to_priority(&alert.severity)
}

/// Style for a backend alert, via its severity string.
pub fn alert_style(alert: &Alert) -> DisplayStyle {
    priority_style(alert_priority(alert))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glp_contracts::{
        alert::Alert,
        clinical::{AdherenceBand, AdherenceState, AlertPriority, RiskLevel, SeverityLevel},
        ids::AlertId,
    };

    use super::*;

    // ── Severity table ────────────────────────────────────────────────────────

    #[test]
    fn severity_triples_are_distinct_and_non_empty() {
        let triples: HashSet<_> = SeverityLevel::ALL
            .iter()
            .map(|&level| {
                let (bg, border, text) = severity_style(level).colors();
                assert!(!bg.is_empty() && !border.is_empty() && !text.is_empty());
                (bg, border, text)
            })
            .collect();
        assert_eq!(triples.len(), SeverityLevel::ALL.len());
    }

    #[test]
    fn severity_extremes_use_neutral_and_error() {
        assert_eq!(severity_style(SeverityLevel::None).tone, Tone::Neutral);
        assert_eq!(severity_style(SeverityLevel::VerySevere).tone, Tone::Error);
    }

    // ── Adherence table ───────────────────────────────────────────────────────

    #[test]
    fn adherence_endpoints() {
        assert_eq!(adherence_style(AdherenceState::Missed).tone, Tone::Error);
        assert_eq!(adherence_style(AdherenceState::Adherent).tone, Tone::Success);
    }

    #[test]
    fn adherence_mapping_is_injective() {
        let triples: HashSet<_> = AdherenceState::ALL
            .iter()
            .map(|&s| adherence_style(s).colors())
            .collect();
        assert_eq!(triples.len(), AdherenceState::ALL.len());
    }

    // ── Priority map ──────────────────────────────────────────────────────────

    #[test]
    fn known_severity_strings_map_to_priorities() {
        assert_eq!(map_severity_to_priority("Low"), AlertPriority::Info);
        assert_eq!(map_severity_to_priority("Medium"), AlertPriority::Advisory);
        assert_eq!(map_severity_to_priority("High"), AlertPriority::Warning);
        assert_eq!(map_severity_to_priority("Critical"), AlertPriority::Critical);
    }

    #[test]
    fn unknown_or_miscased_strings_default_to_info() {
        for s in ["low", "unknown", "", "CRITICAL", " High"] {
            assert_eq!(map_severity_to_priority(s), AlertPriority::Info, "input {s:?}");
        }
    }

    #[test]
    fn priority_styles_are_distinct() {
        let tones: HashSet<_> = AlertPriority::ALL.iter().map(|&p| priority_style(p).tone).collect();
        assert_eq!(tones.len(), 4);
        assert_eq!(priority_style(AlertPriority::Critical).tone, Tone::Error);
    }

    #[test]
    fn alert_style_goes_through_the_severity_string() {
        let alert = Alert {
            id: AlertId::new("a-1"),
            severity: "High".to_string(),
            alert_type: "gi_symptoms".to_string(),
            message: "Persistent nausea reported".to_string(),
            recommendation: "Contact your provider".to_string(),
        };
        assert_eq!(alert_style(&alert), priority_style(AlertPriority::Warning));
    }

    // ── Risk and adherence buckets ────────────────────────────────────────────

    #[test]
    fn risk_buckets() {
        assert_eq!(risk_level(0), RiskLevel::Low);
        assert_eq!(risk_level(24), RiskLevel::Low);
        assert_eq!(risk_level(25), RiskLevel::Moderate);
        assert_eq!(risk_level(50), RiskLevel::Elevated);
        assert_eq!(risk_level(75), RiskLevel::High);
        assert_eq!(risk_level(255), RiskLevel::High);
        assert_eq!(risk_style(RiskLevel::High).tone, Tone::Error);
    }

    #[test]
    fn adherence_percent_thresholds() {
        assert_eq!(adherence_band(100.0), AdherenceBand::OnTrack);
        assert_eq!(adherence_band(90.0), AdherenceBand::OnTrack);
        assert_eq!(adherence_band(89.9), AdherenceBand::Slipping);
        assert_eq!(adherence_band(70.0), AdherenceBand::Slipping);
        assert_eq!(adherence_band(69.9), AdherenceBand::OffTrack);
        assert_eq!(adherence_band(f64::NAN), AdherenceBand::OffTrack);
        assert_eq!(adherence_band(-5.0), AdherenceBand::OffTrack);
        assert_eq!(adherence_band_style(AdherenceBand::OnTrack).tone, Tone::Success);
    }

    #[test]
    fn display_style_serializes_tone_lowercase() {
        let json = serde_json::to_value(severity_style(SeverityLevel::Moderate)).unwrap();
        assert_eq!(json["tone"], "caution");
        assert_eq!(json["label"], "Moderate");
    }
}
