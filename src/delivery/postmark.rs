use anyhow::Context;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use crate::delivery::{DeliveryChannel, DeliveryError};
use crate::domain::{ContactEmail, ContactMessage};

/// Sends contact messages to the site owner as regular emails through Postmark's API.
pub struct PostmarkClient {
    http_client: Client,
    base_url: Url,
    sender: ContactEmail,
    recipient: ContactEmail,
    authorization_token: Secret<String>,
}

impl PostmarkClient {
    pub fn new(
        base_url: Url,
        sender: ContactEmail,
        recipient: ContactEmail,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        // one timeout for the whole client rather than per request
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            recipient,
            authorization_token,
        })
    }
}

#[async_trait::async_trait]
impl DeliveryChannel for PostmarkClient {
    #[tracing::instrument(name = "Deliver contact message through Postmark", skip_all)]
    async fn deliver(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        let url = self
            .base_url
            .join("/email")
            .context("Failed to build the Postmark email url")?;

        let html_body = message.html_body();
        let text_body = message.text_body();
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: self.recipient.as_ref(),
            reply_to: &message.reply_to,
            subject: &message.subject,
            html_body: &html_body,
            text_body: &text_body,
        };

        let response = self
            .http_client
            .post(url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.into()))?;
        // `send` only fails on transport problems; status codes have to be checked separately.
        response
            .error_for_status()
            .map_err(|e| DeliveryError::Rejected(e.into()))?;

        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}
