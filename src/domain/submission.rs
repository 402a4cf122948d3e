use crate::domain::{
    validate_field, ContactEmail, ContactMessage, ContactName, ContactSubject, Field,
    ValidationResult,
};

/// Wire form of a contact form submission.
///
/// Missing keys and `null` values deserialize to empty strings so that they are reported
/// like empty fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SubmissionPayload {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl SubmissionPayload {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Every field checked independently, in form order.
    pub fn validate(&self) -> Vec<ValidationResult> {
        Field::ALL
            .into_iter()
            .map(|field| validate_field(field, self.value(field)))
            .collect()
    }
}

/// A submission whose four fields all passed their predicates.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("All fields are required")]
    MissingFields(Vec<Field>),
    #[error("Invalid email address")]
    InvalidEmail(Vec<ValidationResult>),
    #[error("Invalid submission")]
    InvalidFields(Vec<ValidationResult>),
}

impl SubmissionError {
    /// Field-level reasons for the rejection.
    pub fn field_errors(&self) -> Vec<ValidationResult> {
        match self {
            SubmissionError::MissingFields(fields) => fields
                .iter()
                .map(|field| {
                    ValidationResult::invalid(*field, format!("{} is required", field.label()))
                })
                .collect(),
            SubmissionError::InvalidEmail(errors) | SubmissionError::InvalidFields(errors) => {
                errors.clone()
            }
        }
    }
}

impl TryFrom<SubmissionPayload> for Submission {
    type Error = SubmissionError;

    fn try_from(payload: SubmissionPayload) -> Result<Self, Self::Error> {
        let missing: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| payload.value(*field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(SubmissionError::MissingFields(missing));
        }

        let errors: Vec<ValidationResult> = payload
            .validate()
            .into_iter()
            .filter(|result| !result.is_valid)
            .collect();
        if errors.iter().any(|error| error.field == Field::Email) {
            return Err(SubmissionError::InvalidEmail(errors));
        }
        if !errors.is_empty() {
            return Err(SubmissionError::InvalidFields(errors));
        }

        Ok(Submission {
            name: ContactName::parse(payload.name).map_err(rejected(Field::Name))?,
            email: ContactEmail::parse(payload.email).map_err(rejected(Field::Email))?,
            subject: ContactSubject::parse(payload.subject).map_err(rejected(Field::Subject))?,
            message: ContactMessage::parse(payload.message).map_err(rejected(Field::Message))?,
        })
    }
}

fn rejected(field: Field) -> impl Fn(String) -> SubmissionError {
    move |message| {
        let errors = vec![ValidationResult::invalid(field, message)];
        match field {
            Field::Email => SubmissionError::InvalidEmail(errors),
            _ => SubmissionError::InvalidFields(errors),
        }
    }
}
