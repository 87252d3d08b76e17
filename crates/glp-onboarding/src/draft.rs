//! The onboarding draft.
//!
//! Everything the user types during onboarding accumulates here. The draft is
//! plain data: the wizard decides when it is complete enough to submit, and
//! keeps it intact if submission fails.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use glp_contracts::clinical::{HeightUnit, WeightUnit};

/// Accumulated onboarding input, one group of fields per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingDraft {
    // Step 1: personal details.
    pub name: String,
    /// As typed, `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub email: String,
    pub phone: String,

    // Step 2: body measurements and care team.
    pub height: Option<f64>,
    pub height_unit: HeightUnit,
    pub weight: Option<f64>,
    pub weight_unit: WeightUnit,
    pub provider_name: String,

    // Step 3: medication. Set through the wizard so dosage stays consistent.
    pub(crate) medication: Option<String>,
    pub(crate) dosage: Option<String>,
    pub injection_day: Option<Weekday>,
    pub injection_time: Option<NaiveTime>,

    // Step 4: consent.
    pub accepted_terms: bool,
    pub accepted_privacy: bool,
    pub share_data: bool,

    // Step 5: emergency contact.
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
}

impl OnboardingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn medication(&self) -> Option<&str> {
        self.medication.as_deref()
    }

    pub fn dosage(&self) -> Option<&str> {
        self.dosage.as_deref()
    }

    /// The date of birth, if it parses as `YYYY-MM-DD`.
    pub fn parsed_date_of_birth(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d").ok()
    }

    /// Age in whole years on `today`. `None` if the date of birth is missing,
    /// malformed, or after `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.parsed_date_of_birth()?;
        if dob > today {
            return None;
        }
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }

    /// Flip the height unit, converting any entered value.
    pub fn toggle_height_unit(&mut self) {
        let next = self.height_unit.toggled();
        self.height = self
            .height
            .map(|v| round_tenth(self.height_unit.to_cm(v) / next.to_cm(1.0)));
        self.height_unit = next;
    }

    /// Flip the weight unit, converting any entered value.
    pub fn toggle_weight_unit(&mut self) {
        let next = self.weight_unit.toggled();
        self.weight = self
            .weight
            .map(|v| round_tenth(self.weight_unit.to_kg(v) / next.to_kg(1.0)));
        self.weight_unit = next;
    }

    pub fn height_cm(&self) -> Option<f64> {
        self.height.map(|v| self.height_unit.to_cm(v))
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight.map(|v| self.weight_unit.to_kg(v))
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
