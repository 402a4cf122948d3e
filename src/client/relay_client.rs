use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::domain::{RelayResult, SubmissionPayload};

/// Transport from the contact form to the relay endpoint.
pub trait RelayClient: Send + Sync {
    fn send(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<RelayResult, RelayClientError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum RelayClientError {
    #[error("Failed to reach the contact relay")]
    Transport(#[from] reqwest::Error),
    #[error("The contact relay answered {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("The contact relay reported a failure: {0}")]
    Failed(String),
}

/// Posts submissions as JSON to `{base_url}/api/send-email`; a path in `base_url` is kept.
pub struct HttpRelayClient {
    http_client: Client,
    endpoint: Url,
}

impl HttpRelayClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let endpoint = base_url.join("api/send-email")?;
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }
}

impl RelayClient for HttpRelayClient {
    #[tracing::instrument(name = "Posting a submission to the contact relay", skip_all)]
    async fn send(&self, payload: &SubmissionPayload) -> Result<RelayResult, RelayClientError> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // prefer the relay's own message, the body may not be ours though (e.g. a proxy page)
            let message = match response.json::<RelayResult>().await {
                Ok(result) => result.message,
                Err(_) => status.canonical_reason().unwrap_or_default().to_owned(),
            };
            return Err(RelayClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let result: RelayResult = response.json().await?;
        if !result.success {
            return Err(RelayClientError::Failed(result.message));
        }
        Ok(result)
    }
}
