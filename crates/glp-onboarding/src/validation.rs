//! Per-step required-field checks.
//!
//! Each step has a predicate over the draft. Every check for the step runs
//! and all failures are collected, so the user sees the full list of missing
//! fields in one prompt instead of fixing them one at a time.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use glp_config::MedicationCatalog;

use crate::draft::OnboardingDraft;

/// The five onboarding steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Personal,
    BodyAndCareTeam,
    Medication,
    Consent,
    EmergencyContact,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Personal,
        Step::BodyAndCareTeam,
        Step::Medication,
        Step::Consent,
        Step::EmergencyContact,
    ];

    /// 1-based position, as shown in the progress indicator.
    pub const fn number(self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::BodyAndCareTeam => 2,
            Step::Medication => 3,
            Step::Consent => 4,
            Step::EmergencyContact => 5,
        }
    }

    pub const fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::Personal),
            2 => Some(Step::BodyAndCareTeam),
            3 => Some(Step::Medication),
            4 => Some(Step::Consent),
            5 => Some(Step::EmergencyContact),
            _ => None,
        }
    }

    pub const fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub const fn previous(self) -> Option<Step> {
        Step::from_number(self.number() - 1)
    }

    pub const fn is_last(self) -> bool {
        matches!(self, Step::EmergencyContact)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Step::Personal => "Personal details",
            Step::BodyAndCareTeam => "Body measurements and care team",
            Step::Medication => "Medication",
            Step::Consent => "Consent",
            Step::EmergencyContact => "Emergency contact",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One field that blocked a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFailure {
    /// Draft field name, e.g. `"email"`.
    pub field: String,
    pub message: String,
}

/// Result of checking one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub step: Step,
    /// True only if every check passed.
    pub passed: bool,
    /// Empty on pass.
    pub failures: Vec<FieldFailure>,
}

impl ValidationReport {
    /// The blocking prompt shown to the user: every failure, one per line.
    pub fn prompt(&self) -> String {
        self.failures
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn failed_fields(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.field.as_str()).collect()
    }
}

/// Collects failures for one step.
struct Checks {
    failures: Vec<FieldFailure>,
}

impl Checks {
    fn new() -> Self {
        Self { failures: Vec::new() }
    }

    fn require(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.failures.push(FieldFailure {
                field: field.to_string(),
                message: message.into(),
            });
        }
    }

    fn finish(self, step: Step) -> ValidationReport {
        ValidationReport {
            step,
            passed: self.failures.is_empty(),
            failures: self.failures,
        }
    }
}

fn present(s: &str) -> bool {
    !s.trim().is_empty()
}

fn positive(v: Option<f64>) -> bool {
    matches!(v, Some(x) if x.is_finite() && x > 0.0)
}

/// Check `step`'s required fields against `draft`.
///
/// `today` bounds the date of birth; `catalog` constrains the dosage.
pub fn validate_step(
    step: Step,
    draft: &OnboardingDraft,
    catalog: &MedicationCatalog,
    today: NaiveDate,
) -> ValidationReport {
    let mut checks = Checks::new();

    match step {
        Step::Personal => {
            checks.require(present(&draft.name), "name", "Please enter your name.");
            match draft.parsed_date_of_birth() {
                None => checks.require(
                    false,
                    "date_of_birth",
                    "Please enter your date of birth as YYYY-MM-DD.",
                ),
                Some(dob) => checks.require(
                    dob < today,
                    "date_of_birth",
                    "Date of birth must be in the past.",
                ),
            }
            checks.require(
                present(&draft.email) && draft.email.contains('@'),
                "email",
                "Please enter a valid email address.",
            );
        }
        Step::BodyAndCareTeam => {
            checks.require(positive(draft.height), "height", "Please enter your height.");
            checks.require(positive(draft.weight), "weight", "Please enter your weight.");
        }
        Step::Medication => {
            let entry = draft.medication().and_then(|name| catalog.find(name));
            checks.require(entry.is_some(), "medication", "Please select your medication.");
            match (entry, draft.dosage()) {
                (_, None) => checks.require(false, "dosage", "Please select your dosage."),
                (Some(entry), Some(dosage)) => checks.require(
                    entry.offers(dosage),
                    "dosage",
                    format!("{} is not available for {}.", dosage, entry.name),
                ),
                (None, Some(_)) => {}
            }
            checks.require(
                draft.injection_day.is_some(),
                "injection_day",
                "Please choose your injection day.",
            );
            checks.require(
                draft.injection_time.is_some(),
                "injection_time",
                "Please choose your injection time.",
            );
        }
        Step::Consent => {
            checks.require(
                draft.accepted_terms,
                "accepted_terms",
                "Please accept the terms of service.",
            );
            checks.require(
                draft.accepted_privacy,
                "accepted_privacy",
                "Please accept the privacy policy.",
            );
        }
        Step::EmergencyContact => {
            checks.require(
                present(&draft.emergency_contact_name),
                "emergency_contact_name",
                "Please enter an emergency contact name.",
            );
            checks.require(
                present(&draft.emergency_contact_phone),
                "emergency_contact_phone",
                "Please enter an emergency contact phone number.",
            );
        }
    }

    let report = checks.finish(step);
    debug!(step = %step, passed = report.passed, failures = report.failures.len(), "step validated");
    report
}
