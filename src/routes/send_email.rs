use std::fmt::{Debug, Formatter};

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::domain::{RelayResult, Submission, SubmissionError, SubmissionPayload};
use crate::error_handling::error_chain_fmt;
use crate::mail_relay::MailRelay;

#[derive(thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    ValidationError(#[from] SubmissionError),
    // The cause stays in the logs; callers only ever see this message.
    #[error("Failed to send email. Please try again later.")]
    SendError(#[source] anyhow::Error),
}

impl Debug for RelayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::ValidationError(_) => StatusCode::BAD_REQUEST,
            RelayError::SendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            RelayError::ValidationError(e) => {
                RelayResult::failure(e.to_string()).with_errors(e.field_errors())
            }
            RelayError::SendError(_) => RelayResult::failure(self.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Relays a contact form submission as an email.
///
/// The payload is validated again here: the browser-side checks can be bypassed by posting
/// to the endpoint directly.
#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(payload, mail_relay),
    fields(
        contact_email = %payload.email,
        contact_name = %payload.name
    )
)]
pub async fn send_email(
    payload: web::Json<SubmissionPayload>,
    mail_relay: web::Data<MailRelay>,
) -> Result<HttpResponse, RelayError> {
    let submission: Submission = payload.0.try_into()?;
    mail_relay
        .relay(&submission)
        .await
        .map_err(RelayError::SendError)?;
    Ok(HttpResponse::Ok().json(RelayResult::success("Email sent successfully")))
}

/// Answers unparseable bodies with the same structured shape as every other rejection.
pub fn json_error_handler(error: JsonPayloadError, _request: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error.cause_chain = ?error, "Rejected a malformed contact form payload");
    let response = HttpResponse::BadRequest().json(RelayResult::failure("Invalid request body"));
    InternalError::from_response(error, response).into()
}
