use crate::domain::ValidationResult;

/// Body of every response from the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RelayResult {
    pub success: bool,
    pub message: String,
    /// Failing fields, when the relay rejected the submission on its field rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationResult>,
}

impl RelayResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ValidationResult>) -> Self {
        self.errors = errors;
        self
    }
}
