//! The onboarding step gate.
//!
//! `OnboardingWizard` walks the user through five linear steps:
//!
//!   Personal → Body & care team → Medication → Consent → Emergency contact
//!
//! `advance` moves forward only when the current step's checks pass. On the
//! last step it submits the draft instead:
//!
//!   create user → create medication → complete onboarding → seed education
//!
//! A blocked step or a failed submission is NOT an error. Both come back as
//! `StepOutcome` variants and leave the wizard where it was, draft intact.
//! Each create carries an idempotency key tied to this wizard's submission
//! id, and progress is recorded per call, so a retry resumes at the call
//! that failed and never creates a second user.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use glp_config::MedicationCatalog;
use glp_contracts::{
    error::{GlpError, GlpResult},
    ids::SubmissionId,
    medication::{CreateMedication, Medication},
    user::{CreateUser, User},
};
use glp_core::{traits::Operation, AppContext};

use crate::{
    draft::OnboardingDraft,
    idempotency::idempotency_key,
    validation::{validate_step, Step, ValidationReport},
};

/// What the user sees on a failed submission.
const SUBMIT_ACTION: &str = "complete onboarding";

/// The user and regimen created by a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub user: User,
    pub medication: Medication,
}

/// The result of pressing Next / Continue.
#[derive(Debug)]
pub enum StepOutcome {
    /// The step's checks passed and the wizard moved forward.
    Advanced { to: Step },

    /// A required field is missing or invalid. The wizard did not move.
    Blocked(ValidationReport),

    /// Submission succeeded and the user is signed in.
    Completed(Enrollment),

    /// A backend call failed. The wizard stays on the last step with the
    /// draft retained; calling `advance` again retries from the failed call.
    SubmissionFailed { message: String, error: GlpError },
}

/// Which submission calls have already succeeded.
#[derive(Debug, Clone, Default)]
struct SubmissionProgress {
    user: Option<User>,
    medication: Option<Medication>,
    onboarding_completed: bool,
    education_seeded: bool,
}

impl SubmissionProgress {
    fn is_empty(&self) -> bool {
        self.user.is_none() && self.medication.is_none()
    }
}

/// Five-step onboarding state machine.
pub struct OnboardingWizard {
    step: Step,
    draft: OnboardingDraft,
    catalog: MedicationCatalog,
    submission_id: SubmissionId,
    progress: SubmissionProgress,
    last_error: Option<String>,
    finished: bool,
}

impl OnboardingWizard {
    /// A wizard on step 1 with an empty draft.
    pub fn new(catalog: MedicationCatalog) -> Self {
        Self::with_submission_id(catalog, SubmissionId::new())
    }

    /// As `new`, with a caller-chosen submission id.
    pub fn with_submission_id(catalog: MedicationCatalog, submission_id: SubmissionId) -> Self {
        debug!(submission_id = %submission_id, "onboarding started");
        Self {
            step: Step::Personal,
            draft: OnboardingDraft::new(),
            catalog,
            submission_id,
            progress: SubmissionProgress::default(),
            last_error: None,
            finished: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &OnboardingDraft {
        &self.draft
    }

    /// Edit the draft.
    ///
    /// Edits after a partial submission re-send the creates on the next
    /// attempt. The keys do not change, so the backend updates the records
    /// it already holds.
    pub fn draft_mut(&mut self) -> &mut OnboardingDraft {
        self.touch();
        &mut self.draft
    }

    pub fn catalog(&self) -> &MedicationCatalog {
        &self.catalog
    }

    pub fn submission_id(&self) -> &SubmissionId {
        &self.submission_id
    }

    /// The message from the most recent failed submission, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // ── Medication selection ──────────────────────────────────────────────────

    /// Dosages offered for the selected medication. Empty until one is chosen.
    pub fn dosage_options(&self) -> &[String] {
        self.draft
            .medication()
            .map(|name| self.catalog.dosages_for(name))
            .unwrap_or(&[])
    }

    /// Select a medication by catalog name.
    ///
    /// Switching to a different medication clears the chosen dosage.
    pub fn select_medication(&mut self, name: &str) -> GlpResult<()> {
        if self.catalog.find(name).is_none() {
            return Err(GlpError::Validation {
                reason: format!("{} is not in the medication catalog.", name),
            });
        }
        self.touch();
        if self.draft.medication() != Some(name) {
            if let Some(previous) = self.draft.dosage.take() {
                debug!(medication = %name, cleared_dosage = %previous, "medication changed, dosage cleared");
            }
            self.draft.medication = Some(name.to_string());
        }
        Ok(())
    }

    /// Select a dosage from [`dosage_options`](Self::dosage_options).
    pub fn select_dosage(&mut self, dosage: &str) -> GlpResult<()> {
        let Some(medication) = self.draft.medication() else {
            return Err(GlpError::Validation {
                reason: "Please select your medication first.".to_string(),
            });
        };
        if !self.dosage_options().iter().any(|d| d == dosage) {
            return Err(GlpError::Validation {
                reason: format!("{} is not available for {}.", dosage, medication),
            });
        }
        self.touch();
        self.draft.dosage = Some(dosage.to_string());
        Ok(())
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    /// Go back one step. Not available on step 1 or after completion.
    pub fn back(&mut self) -> GlpResult<Step> {
        if self.finished {
            return Err(GlpError::StateMachineError {
                reason: "onboarding is already complete".to_string(),
            });
        }
        let previous = self.step.previous().ok_or_else(|| GlpError::StateMachineError {
            reason: "cannot go back from the first step".to_string(),
        })?;
        debug!(from = %self.step, to = %previous, "onboarding step back");
        self.step = previous;
        Ok(previous)
    }

    /// Next / Continue.
    ///
    /// # Errors
    ///
    /// Only `StateMachineError` when the wizard has already completed.
    /// Validation blocks and backend failures are `Ok` outcomes.
    pub async fn advance(&mut self, ctx: &AppContext) -> GlpResult<StepOutcome> {
        if self.finished {
            return Err(GlpError::StateMachineError {
                reason: "onboarding is already complete".to_string(),
            });
        }

        let today = ctx.clock().today();
        let report = validate_step(self.step, &self.draft, &self.catalog, today);
        if !report.passed {
            info!(
                step = %self.step,
                fields = ?report.failed_fields(),
                "onboarding step blocked"
            );
            return Ok(StepOutcome::Blocked(report));
        }

        match self.step.next() {
            Some(next) => {
                debug!(from = %self.step, to = %next, "onboarding step advanced");
                self.step = next;
                Ok(StepOutcome::Advanced { to: next })
            }
            None => {
                // Earlier steps may have been edited since they were passed.
                for step in Step::ALL.into_iter().filter(|s| *s != self.step) {
                    let report = validate_step(step, &self.draft, &self.catalog, today);
                    if !report.passed {
                        info!(step = %step, "earlier onboarding step no longer valid");
                        return Ok(StepOutcome::Blocked(report));
                    }
                }
                Ok(self.submit(ctx, today).await)
            }
        }
    }

    // ── Submission ────────────────────────────────────────────────────────────

    async fn submit(&mut self, ctx: &AppContext, today: NaiveDate) -> StepOutcome {
        info!(
            submission_id = %self.submission_id,
            resuming = !self.progress.is_empty(),
            "submitting onboarding"
        );

        match self.run_submission(ctx, today).await {
            Ok(enrollment) => {
                self.finished = true;
                self.last_error = None;
                ctx.sign_in(enrollment.user.clone());
                info!(
                    submission_id = %self.submission_id,
                    user_id = %enrollment.user.id,
                    medication_id = %enrollment.medication.id,
                    "onboarding complete"
                );
                StepOutcome::Completed(enrollment)
            }
            Err(error) => {
                let message = error.user_message(SUBMIT_ACTION);
                warn!(
                    submission_id = %self.submission_id,
                    error = %error,
                    "onboarding submission failed, draft retained"
                );
                self.last_error = Some(message.clone());
                StepOutcome::SubmissionFailed { message, error }
            }
        }
    }

    /// Run every call that has not yet succeeded, in order.
    async fn run_submission(&mut self, ctx: &AppContext, today: NaiveDate) -> GlpResult<Enrollment> {
        let backend = ctx.backend();

        let user = match self.progress.user.clone() {
            Some(user) => user,
            None => {
                let request = self.user_request(today)?;
                let user = backend.create_user(&request).await?;
                self.progress.user = Some(user.clone());
                user
            }
        };

        let medication = match self.progress.medication.clone() {
            Some(medication) => medication,
            None => {
                let request = self.medication_request(&user, today)?;
                let medication = backend.create_medication(&request).await?;
                self.progress.medication = Some(medication.clone());
                medication
            }
        };

        if !self.progress.onboarding_completed {
            let updated = backend
                .complete_onboarding(&user.id)
                .await?
                .ok_or_else(|| GlpError::NotFound {
                    entity: "user".to_string(),
                    id: user.id.to_string(),
                })?;
            self.progress.user = Some(updated);
            self.progress.onboarding_completed = true;
        }

        let user = self.progress.user.clone().unwrap_or(user);

        if !self.progress.education_seeded {
            match backend.seed_education(&user.id).await {
                Ok(()) => self.progress.education_seeded = true,
                // Education content is optional; onboarding still completes.
                Err(e) => warn!(user_id = %user.id, error = %e, "education seeding failed"),
            }
        }

        Ok(Enrollment { user, medication })
    }

    fn user_request(&self, today: NaiveDate) -> GlpResult<CreateUser> {
        let age = self.draft.age_on(today).ok_or_else(|| GlpError::Validation {
            reason: "Please enter your date of birth as YYYY-MM-DD.".to_string(),
        })?;
        Ok(CreateUser {
            name: self.draft.name.trim().to_string(),
            age,
            email: self.draft.email.trim().to_string(),
            idempotency_key: Some(self.key(Operation::CreateUser)),
        })
    }

    fn medication_request(&self, user: &User, today: NaiveDate) -> GlpResult<CreateMedication> {
        let missing = |field: &str| GlpError::Validation {
            reason: format!("Please choose your {}.", field),
        };
        let entry = self
            .draft
            .medication()
            .and_then(|name| self.catalog.find(name))
            .ok_or_else(|| missing("medication"))?;
        Ok(CreateMedication {
            user_id: user.id.clone(),
            drug_name: entry.name.clone(),
            dosage: self.draft.dosage().ok_or_else(|| missing("dosage"))?.to_string(),
            frequency: entry.frequency.clone(),
            injection_day: self.draft.injection_day.ok_or_else(|| missing("injection day"))?,
            injection_time: self.draft.injection_time.ok_or_else(|| missing("injection time"))?,
            start_date: today,
            idempotency_key: Some(self.key(Operation::CreateMedication)),
        })
    }

    fn key(&self, operation: Operation) -> String {
        idempotency_key(&self.submission_id, operation.as_str())
    }

    /// Forget completed creates so the next attempt re-sends them.
    fn touch(&mut self) {
        if !self.finished && !self.progress.is_empty() {
            debug!(submission_id = %self.submission_id, "draft edited after partial submission");
            self.progress.user = None;
            self.progress.medication = None;
        }
    }
}
