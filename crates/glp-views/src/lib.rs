//! # glp-views
//!
//! View models for the screens of the GLP-1 monitoring client.
//!
//! - [`dashboard`]: summary and alerts, loaded concurrently and styled
//! - [`alerts`]: the alert inbox with acknowledge-and-remove
//! - [`symptoms`]: symptom logging on the backend's 1..=10 scale
//! - [`next_dose`]: the next-injection card and its live countdown
//!
//! Every view takes an [`AppContext`](glp_core::AppContext) rather than
//! reaching for global state.

pub mod alerts;
pub mod dashboard;
pub mod next_dose;
pub mod symptoms;

pub use alerts::AlertInbox;
pub use dashboard::{load_dashboard, DashboardScreen, DashboardView, StyledAlert};
pub use next_dose::{start_countdown, NextDose};
pub use symptoms::{log_symptom, LoggedSymptom, SymptomEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────
