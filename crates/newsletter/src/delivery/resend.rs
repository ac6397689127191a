//! Delivery through the Resend HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::mailer::{MailError, Mailer, OutgoingEmail};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    bcc: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

fn is_empty(list: &&[String]) -> bool {
    list.is_empty()
}

/// Sends email with a bearer-authenticated POST to Resend.
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_key: &str) -> Self {
        Self::with_endpoint(api_key, RESEND_ENDPOINT)
    }

    /// Point at a different API base (used against local fakes).
    pub fn with_endpoint(api_key: &str, endpoint: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let payload = ResendPayload {
            from: &email.from,
            to: &email.to,
            bcc: &email.bcc,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
            reply_to: email.reply_to.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(
            subject = %email.subject,
            recipients = email.to.len() + email.bcc.len(),
            "Email accepted by Resend"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}
