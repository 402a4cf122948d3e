use std::time::Duration;

use lettre::address::AddressError;
use lettre::message::{Mailbox, MultiPart};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::ContactEmail;

/// Sends relayed contact messages from a fixed sender to a fixed recipient over SMTP.
pub struct EmailClient {
    sender: Address,
    recipient: Address,
    transport: AsyncSmtpTransport<Tokio1Executor>,
    timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum SendEmailError {
    #[error("{0} is not a deliverable mailbox address")]
    InvalidAddress(String, #[source] AddressError),
    #[error("Failed to build the email message")]
    Build(#[from] lettre::error::Error),
    #[error("The SMTP transport failed")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("The SMTP server did not answer within {0:?}")]
    Timeout(Duration),
}

impl EmailClient {
    pub fn new(
        transport: AsyncSmtpTransport<Tokio1Executor>,
        sender: ContactEmail,
        recipient: ContactEmail,
        timeout: Duration,
    ) -> Result<Self, SendEmailError> {
        Ok(Self {
            sender: parse_address(&sender)?,
            recipient: parse_address(&recipient)?,
            transport,
            timeout,
        })
    }

    /// Sends one message; the whole SMTP exchange is bounded by the configured timeout.
    #[tracing::instrument(
        name = "Sending an email over SMTP",
        skip_all,
        fields(reply_to = %reply_to)
    )]
    pub async fn send_email(
        &self,
        reply_to: &ContactEmail,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), SendEmailError> {
        let message = self.build_message(reply_to, subject, html_content, text_content)?;
        let response = tokio::time::timeout(self.timeout, self.transport.send(message))
            .await
            .map_err(|_| SendEmailError::Timeout(self.timeout))??;
        tracing::debug!(code = %response.code(), "SMTP server accepted the message");
        Ok(())
    }

    fn build_message(
        &self,
        reply_to: &ContactEmail,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<Message, SendEmailError> {
        let message = Message::builder()
            .from(Mailbox::new(None, self.sender.clone()))
            .to(Mailbox::new(None, self.recipient.clone()))
            .reply_to(Mailbox::new(None, parse_address(reply_to)?))
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text_content.to_owned(),
                html_content.to_owned(),
            ))?;
        Ok(message)
    }
}

fn parse_address(email: &ContactEmail) -> Result<Address, SendEmailError> {
    email
        .as_ref()
        .parse()
        .map_err(|e| SendEmailError::InvalidAddress(email.to_string(), e))
}
