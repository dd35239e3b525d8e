use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::message::Message;

pub const DEFAULT_RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Delivery {
    Sent { id: Option<String> },
    /// No provider configured; nothing left the process.
    Skipped,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, to: &str, message: &Message) -> Result<Delivery, NotifyError>;
}

/// Provider settings, normally read from the environment.
#[derive(Debug, Clone, Default)]
pub struct NotifyConfig {
    pub api_key: Option<String>,
    pub from: Option<String>,
    pub endpoint: Option<String>,
}

impl NotifyConfig {
    /// Reads `RESEND_API_KEY`, `FROM_EMAIL` and `RESEND_ENDPOINT`. Blank values count as unset.
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            api_key: read("RESEND_API_KEY"),
            from: read("FROM_EMAIL"),
            endpoint: read("RESEND_ENDPOINT"),
        }
    }

    /// Resend when both key and sender are present, otherwise a notifier that skips.
    pub fn build(&self) -> Result<Box<dyn Notifier>, NotifyError> {
        match (&self.api_key, &self.from) {
            (Some(api_key), Some(from)) => {
                let endpoint = self
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| DEFAULT_RESEND_ENDPOINT.to_string());
                tracing::info!(target: "tpcs_notify", endpoint = %endpoint, "email delivery via resend");
                Ok(Box::new(ResendNotifier::new(api_key.clone(), from.clone(), endpoint)?))
            }
            _ => {
                tracing::warn!(
                    target: "tpcs_notify",
                    "email disabled: RESEND_API_KEY or FROM_EMAIL missing"
                );
                Ok(Box::new(DisabledNotifier))
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn send(&self, to: &str, message: &Message) -> Result<Delivery, NotifyError> {
        check_recipient(to)?;
        tracing::warn!(
            target: "tpcs_notify",
            subject = %message.subject,
            "email disabled; skipping delivery"
        );
        Ok(Delivery::Skipped)
    }
}

#[derive(Debug, Clone)]
pub struct ResendNotifier {
    client: Client,
    api_key: String,
    from: String,
    endpoint: String,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct EmailResponse {
    id: Option<String>,
}

impl ResendNotifier {
    pub fn new(api_key: String, from: String, endpoint: String) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            from,
            endpoint,
        })
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, to: &str, message: &Message) -> Result<Delivery, NotifyError> {
        check_recipient(to)?;
        let request = EmailRequest {
            from: &self.from,
            to,
            subject: &message.subject,
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                target: "tpcs_notify",
                status = status.as_u16(),
                body = %body,
                "email provider rejected message"
            );
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // A 2xx without a parseable id still counts as delivered.
        let id = response
            .json::<EmailResponse>()
            .await
            .ok()
            .and_then(|parsed| parsed.id);
        tracing::info!(target: "tpcs_notify", id = ?id, "email sent");
        Ok(Delivery::Sent { id })
    }
}

fn check_recipient(to: &str) -> Result<(), NotifyError> {
    let trimmed = to.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(NotifyError::InvalidRecipient(to.to_string())),
    }
}
