mod contact_email;
mod contact_text;
mod field;
mod relay_result;
mod submission;

pub use contact_email::ContactEmail;
pub use contact_text::{ContactMessage, ContactName, ContactSubject};
pub use field::{validate_field, Field, ValidationResult};
pub use relay_result::RelayResult;
pub use submission::{Submission, SubmissionError, SubmissionPayload};
