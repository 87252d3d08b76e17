//! Clinical enumerations shared by the classification tables and the screens.
//!
//! All of these are closed sets. The only free-text input in the system is
//! the backend's alert severity string, which is folded into
//! [`AlertPriority`] by the classification crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Self-reported intensity of a symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeverityLevel {
    None,
    Mild,
    Moderate,
    Severe,
    VerySevere,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 5] = [
        SeverityLevel::None,
        SeverityLevel::Mild,
        SeverityLevel::Moderate,
        SeverityLevel::Severe,
        SeverityLevel::VerySevere,
    ];

    /// The 1..=10 score sent to the backend when a symptom is logged.
    ///
    /// This is the single place the categorical scale meets the numeric one.
    pub const fn score(self) -> u8 {
        match self {
            Self::None => 1,
            Self::Mild => 3,
            Self::Moderate => 5,
            Self::Severe => 8,
            Self::VerySevere => 10,
        }
    }

    /// Bucket a 1..=10 score back onto the categorical scale.
    ///
    /// Each bucket covers the scores closest to its anchor in [`Self::score`];
    /// out-of-range values clamp to the nearest end.
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=1 => Self::None,
            2..=3 => Self::Mild,
            4..=6 => Self::Moderate,
            7..=8 => Self::Severe,
            _ => Self::VerySevere,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::VerySevere => "Very severe",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a scheduled dose was taken on time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdherenceState {
    Adherent,
    Delayed,
    AtRisk,
    Missed,
}

impl AdherenceState {
    pub const ALL: [AdherenceState; 4] = [
        AdherenceState::Adherent,
        AdherenceState::Delayed,
        AdherenceState::AtRisk,
        AdherenceState::Missed,
    ];
}

/// Urgency bucket for an alert, used for colour and icon selection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertPriority {
    Info,
    Advisory,
    Warning,
    Critical,
}

impl AlertPriority {
    pub const ALL: [AlertPriority; 4] = [
        AlertPriority::Info,
        AlertPriority::Advisory,
        AlertPriority::Warning,
        AlertPriority::Critical,
    ];
}

/// Bucket for a 0..=100 risk score reported on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Moderate,
    Elevated,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::Elevated,
        RiskLevel::High,
    ];
}

/// Bucket for an adherence percentage over a reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdherenceBand {
    OnTrack,
    Slipping,
    OffTrack,
}

impl AdherenceBand {
    pub const ALL: [AdherenceBand; 3] = [
        AdherenceBand::OnTrack,
        AdherenceBand::Slipping,
        AdherenceBand::OffTrack,
    ];
}

/// Unit the user entered their height in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeightUnit {
    #[default]
    Centimeters,
    Inches,
}

impl HeightUnit {
    /// Convert `value` in this unit to centimetres.
    pub fn to_cm(self, value: f64) -> f64 {
        match self {
            Self::Centimeters => value,
            Self::Inches => value * 2.54,
        }
    }

    /// The other unit; backs the unit toggle on the form.
    pub fn toggled(self) -> Self {
        match self {
            Self::Centimeters => Self::Inches,
            Self::Inches => Self::Centimeters,
        }
    }
}

/// Unit the user entered their weight in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightUnit {
    #[default]
    Kilograms,
    Pounds,
}

impl WeightUnit {
    /// Convert `value` in this unit to kilograms.
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kilograms => value,
            Self::Pounds => value * 0.453_592_37,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Kilograms => Self::Pounds,
            Self::Pounds => Self::Kilograms,
        }
    }
}
