use std::fmt::{Display, Formatter};

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::contact_email::is_valid_email;

/// The four required inputs of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// The key used for this field in form markup and in the JSON payload.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    /// Minimum number of user-perceived characters, once trimmed.
    /// The email field is checked against the mailbox grammar instead.
    pub fn min_length(&self) -> Option<usize> {
        match self {
            Field::Name => Some(2),
            Field::Email => None,
            Field::Subject => Some(5),
            Field::Message => Some(10),
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Field::Name => "Name must be at least 2 characters long",
            Field::Email => "Please enter a valid email address",
            Field::Subject => "Subject must be at least 5 characters long",
            Field::Message => "Message must be at least 10 characters long",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome of checking a single field. `message` is empty when the field is valid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub field: Field,
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn valid(field: Field) -> Self {
        Self {
            field,
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Applies the field predicate to the trimmed value.
pub fn validate_field(field: Field, value: &str) -> ValidationResult {
    let value = value.trim();
    let is_valid = match field.min_length() {
        Some(min_length) => value.graphemes(true).count() >= min_length,
        None => is_valid_email(value),
    };
    if is_valid {
        ValidationResult::valid(field)
    } else {
        ValidationResult::invalid(field, field.error_message())
    }
}
