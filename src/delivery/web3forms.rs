use anyhow::Context;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use crate::delivery::{DeliveryChannel, DeliveryError};
use crate::domain::ContactMessage;

/// Relays contact messages through the Web3Forms submission API, which forwards them to the
/// inbox tied to the access key.
pub struct Web3FormsClient {
    http_client: Client,
    base_url: Url,
    access_key: Secret<String>,
}

impl Web3FormsClient {
    pub fn new(
        base_url: Url,
        access_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            access_key,
        })
    }
}

#[async_trait::async_trait]
impl DeliveryChannel for Web3FormsClient {
    #[tracing::instrument(name = "Deliver contact message through Web3Forms", skip_all)]
    async fn deliver(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        let url = self
            .base_url
            .join("/submit")
            .context("Failed to build the Web3Forms submit url")?;

        let request_body = SubmitRequest {
            access_key: self.access_key.expose_secret(),
            from_name: &message.from_name,
            subject: &message.subject,
            reply_to: &message.reply_to,
            name: &message.name,
            email: &message.email,
            company: &message.company,
            message: &message.message,
        };

        let response = self
            .http_client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.into()))?;

        // Web3Forms reports the outcome in the body, with or without an error status.
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DeliveryError::Transport(e.into()))?;
        let outcome: SubmitResponse = serde_json::from_slice(&body).with_context(|| {
            format!("Web3Forms answered {} with a malformed body", status)
        })?;

        if outcome.success {
            Ok(())
        } else {
            Err(DeliveryError::Rejected(anyhow::anyhow!(
                "Web3Forms answered {}: {}",
                status,
                outcome.message
            )))
        }
    }
}

#[derive(serde::Serialize)]
struct SubmitRequest<'a> {
    access_key: &'a str,
    from_name: &'a str,
    subject: &'a str,
    reply_to: &'a str,
    name: &'a str,
    email: &'a str,
    company: &'a str,
    message: &'a str,
}

#[derive(serde::Deserialize)]
struct SubmitResponse {
    success: bool,
    #[serde(default)]
    message: String,
}
