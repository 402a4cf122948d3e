use crate::domain::{validate_field, Field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubject(String);

/// The free-text body of a submission. Inner line breaks are kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactName {
    pub fn parse(s: String) -> Result<ContactName, String> {
        parse_text(Field::Name, s).map(Self)
    }
}

impl ContactSubject {
    pub fn parse(s: String) -> Result<ContactSubject, String> {
        parse_text(Field::Subject, s).map(Self)
    }
}

impl ContactMessage {
    pub fn parse(s: String) -> Result<ContactMessage, String> {
        parse_text(Field::Message, s).map(Self)
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn parse_text(field: Field, s: String) -> Result<String, String> {
    let result = validate_field(field, &s);
    if result.is_valid {
        Ok(s.trim().to_owned())
    } else {
        Err(result.message)
    }
}
