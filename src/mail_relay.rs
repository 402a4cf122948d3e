use anyhow::Context;

use crate::domain::Submission;
use crate::email_client::EmailClient;
use crate::templates::ContactTemplates;

pub const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

/// Turns a validated submission into exactly one outbound email.
pub struct MailRelay {
    email_client: EmailClient,
    templates: ContactTemplates,
}

impl MailRelay {
    pub fn new(email_client: EmailClient, templates: ContactTemplates) -> Self {
        Self {
            email_client,
            templates,
        }
    }

    /// No retries: a failed transmission is reported to the caller as is.
    #[tracing::instrument(
        name = "Relaying a contact submission",
        skip_all,
        fields(contact_email = %submission.email)
    )]
    pub async fn relay(&self, submission: &Submission) -> Result<(), anyhow::Error> {
        let content = self
            .templates
            .render(submission)
            .context("Failed to render the contact email")?;
        let subject = format!("{}{}", SUBJECT_PREFIX, submission.subject.as_ref());
        self.email_client
            .send_email(&submission.email, &subject, &content.html, &content.text)
            .await
            .with_context(|| format!("Failed to relay the message from {}", submission.email))?;
        Ok(())
    }
}
