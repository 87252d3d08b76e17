//! Next-dose card.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};

use glp_contracts::medication::Medication;
use glp_core::{
    countdown::{format_countdown, next_dose_after, CountdownTicker},
    traits::Clock,
};

/// A snapshot of the next scheduled injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDose {
    pub drug_name: String,
    pub dosage: String,
    pub due_at: DateTime<Utc>,
    pub label: String,
}

impl NextDose {
    pub fn for_medication(medication: &Medication, now: DateTime<Utc>) -> Self {
        let due_at = next_dose_after(medication.injection_day, medication.injection_time, now);
        Self {
            drug_name: medication.drug_name.clone(),
            dosage: medication.dosage.clone(),
            due_at,
            label: format_countdown(due_at, now),
        }
    }
}

/// Start a live countdown to the next injection of `medication`.
///
/// The target is fixed when the ticker starts; the card is expected to
/// remount (and call this again) once the dose is taken.
pub fn start_countdown(medication: &Medication, clock: Arc<dyn Clock>, period: Duration) -> CountdownTicker {
    let due_at = next_dose_after(medication.injection_day, medication.injection_time, clock.now());
    CountdownTicker::spawn(due_at, clock, period)
}
