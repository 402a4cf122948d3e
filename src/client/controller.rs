use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::client::{ContactForm, Notifier, RelayClient, RelayClientError, Severity};
use crate::domain::{validate_field, Field, RelayResult, ValidationResult};

const INVALID_FORM_MESSAGE: &str = "Please fix the errors in the form before submitting.";
const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you within 24 hours.";
const SUCCESS_STATUS: &str = "Message sent successfully!";
const FAILURE_MESSAGE: &str =
    "Failed to send message. Please try again or contact me directly via email.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    /// A submission is in flight; the submit control is disabled and shows a spinner.
    Submitting,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid,
    /// Another submission from this form was still in flight.
    Ignored,
    Sent(RelayResult),
    Failed(RelayClientError),
}

/// Events raised by the form's inputs and its submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input { field: Field, value: String },
    Blur(Field),
    Submit,
}

/// Drives one contact form: inline validation, the submit lifecycle and user feedback.
///
/// All state belongs to the instance. At most one submission is in flight at a time.
pub struct FormController<N, R> {
    notifier: N,
    relay: R,
    form: Mutex<ContactForm>,
    submitting: AtomicBool,
}

impl<N, R> FormController<N, R>
where
    N: Notifier,
    R: RelayClient,
{
    pub fn new(notifier: N, relay: R) -> Self {
        Self {
            notifier,
            relay,
            form: Mutex::new(ContactForm::default()),
            submitting: AtomicBool::new(false),
        }
    }

    /// Snapshot of the form as currently displayed.
    pub fn form(&self) -> ContactForm {
        self.lock_form().clone()
    }

    pub fn state(&self) -> FormState {
        if self.submitting.load(Ordering::Acquire) {
            FormState::Submitting
        } else {
            FormState::Idle
        }
    }

    /// The single entry point for UI events. Only `Submit` produces an outcome.
    pub async fn handle(&self, event: FormEvent) -> Option<SubmitOutcome> {
        match event {
            FormEvent::Input { field, value } => {
                self.lock_form().set_value(field, value);
                None
            }
            FormEvent::Blur(field) => {
                self.validate_field(field);
                None
            }
            FormEvent::Submit => Some(self.submit().await),
        }
    }

    pub fn validate_field(&self, field: Field) -> ValidationResult {
        let mut form = self.lock_form();
        let result = validate_field(field, &form.field(field).value);
        form.apply(&result);
        result
    }

    /// Validates every field, so that every error is displayed, not just the first one.
    pub fn validate_form(&self) -> bool {
        let results: Vec<ValidationResult> = Field::ALL
            .into_iter()
            .map(|field| self.validate_field(field))
            .collect();
        results.iter().all(|result| result.is_valid)
    }

    #[tracing::instrument(name = "Submitting the contact form", skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        if self.state() == FormState::Submitting {
            tracing::debug!("Ignoring a submit while another one is in flight");
            return SubmitOutcome::Ignored;
        }
        if !self.validate_form() {
            self.notifier.notify(INVALID_FORM_MESSAGE, Severity::Error);
            return SubmitOutcome::Invalid;
        }
        let Some(_guard) = SubmittingGuard::acquire(&self.submitting) else {
            return SubmitOutcome::Ignored;
        };

        let payload = self.lock_form().payload();
        match self.relay.send(&payload).await {
            Ok(result) => {
                self.notifier.notify(SUCCESS_MESSAGE, Severity::Success);
                let mut form = self.lock_form();
                form.reset();
                form.set_status(SUCCESS_STATUS, Severity::Success);
                SubmitOutcome::Sent(result)
            }
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "Failed to relay the contact form");
                self.notifier.notify(FAILURE_MESSAGE, Severity::Error);
                self.lock_form().set_status(FAILURE_MESSAGE, Severity::Error);
                SubmitOutcome::Failed(error)
            }
        }
    }

    fn lock_form(&self) -> MutexGuard<'_, ContactForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the submitting flag; dropping it re-enables the submit control on every path out of
/// `submit`, including panics and a dropped future.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl<'a> SubmittingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
