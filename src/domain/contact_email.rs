use lettre::Address;
use validator::validate_email;

use crate::domain::Field;

/// The submitter's mailbox address, used as the Reply-To of the relayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<ContactEmail, String> {
        let s = s.trim();
        if is_valid_email(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(Field::Email.error_message().to_owned())
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A non-empty local part, a single `@` and a dotted domain that `validator` accepts.
/// The address must also be one the SMTP layer can put in a header, which rules out
/// local parts like `a..b`, `a.` or `.a`.
pub(crate) fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && validate_email(s)
        && s.parse::<Address>().is_ok()
}
