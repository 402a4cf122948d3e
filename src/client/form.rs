use crate::client::Severity;
use crate::domain::{Field, SubmissionPayload, ValidationResult};

/// What the user typed into one input and whether its error is on display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    /// The inline error message; `Some` means the input is styled as erroneous.
    pub error: Option<String>,
}

impl FieldState {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The banner shown under the form after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStatus {
    pub message: String,
    pub severity: Severity,
}

/// View state of the contact form.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: FieldState,
    email: FieldState,
    subject: FieldState,
    message: FieldState,
    status: Option<FormStatus>,
}

impl ContactForm {
    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// Typing into an input clears its error until it is validated again.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let state = self.field_mut(field);
        state.value = value.into();
        state.error = None;
    }

    /// Shows or clears the inline error of the field the result belongs to.
    pub fn apply(&mut self, result: &ValidationResult) {
        let state = self.field_mut(result.field);
        state.error = if result.is_valid {
            None
        } else {
            Some(result.message.clone())
        };
    }

    /// Fields currently displaying an error, in form order.
    pub fn errors(&self) -> Vec<(Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| {
                self.field(field)
                    .error
                    .as_deref()
                    .map(|message| (field, message))
            })
            .collect()
    }

    /// The trimmed values, as sent to the relay.
    pub fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            name: self.name.value.trim().to_owned(),
            email: self.email.value.trim().to_owned(),
            subject: self.subject.value.trim().to_owned(),
            message: self.message.value.trim().to_owned(),
        }
    }

    /// Empties every input and clears every inline error.
    pub fn reset(&mut self) {
        for field in Field::ALL {
            *self.field_mut(field) = FieldState::default();
        }
    }

    pub fn status(&self) -> Option<&FormStatus> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, message: impl Into<String>, severity: Severity) {
        self.status = Some(FormStatus {
            message: message.into(),
            severity,
        });
    }
}
