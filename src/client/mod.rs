//! Browser-side half of the contact pipeline: form state, validation and submission.

mod controller;
mod form;
mod notifier;
mod relay_client;

pub use controller::{FormController, FormEvent, FormState, SubmitOutcome};
pub use form::{ContactForm, FieldState, FormStatus};
pub use notifier::{Notifier, Severity, TracingNotifier};
pub use relay_client::{HttpRelayClient, RelayClient, RelayClientError};
