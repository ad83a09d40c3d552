use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Mail provider rejected the message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// Sends mail through a Resend-compatible HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    http_client: Client,
    api_url: String,
    api_key: String,
}

impl ResendMailer {
    #[must_use]
    pub const fn new(http_client: Client, api_url: String, api_key: String) -> Self {
        Self {
            http_client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&SendEmailBody {
                from: &email.from,
                to: [&email.to],
                subject: &email.subject,
                text: &email.text,
                html: &email.html,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected(format!("{status}: {error_text}")));
        }
        Ok(())
    }
}

/// Used when no mail API key is configured: the email is only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        info!(
            "Email delivery disabled, skipping \"{}\" to {}",
            email.subject, email.to
        );
        Ok(())
    }
}
