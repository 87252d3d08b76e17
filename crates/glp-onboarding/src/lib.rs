//! # glp-onboarding
//!
//! The five-step onboarding flow for the GLP-1 monitoring client.
//!
//! - [`draft::OnboardingDraft`] accumulates what the user enters.
//! - [`validation::validate_step`] gates each step on its required fields.
//! - [`wizard::OnboardingWizard`] sequences the steps and submits the draft
//!   to the backend with idempotency keys, resuming after partial failure.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use glp_onboarding::{OnboardingWizard, StepOutcome};
//!
//! let mut wizard = OnboardingWizard::new(config.load_catalog()?);
//! wizard.draft_mut().name = "Alex".into();
//! match wizard.advance(&ctx).await? {
//!     StepOutcome::Blocked(report) => println!("{}", report.prompt()),
//!     other => println!("{:?}", other),
//! }
//! ```

pub mod draft;
pub mod idempotency;
pub mod validation;
pub mod wizard;

pub use draft::OnboardingDraft;
pub use validation::{validate_step, FieldFailure, Step, ValidationReport};
pub use wizard::{Enrollment, OnboardingWizard, StepOutcome};

// ── Tests ─────────────────────────────────────────────────────────────────────
