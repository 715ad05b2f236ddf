use std::sync::Arc;

use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::async_helpers::spawn_blocking_with_tracing;
use crate::delivery::{DeliveryChannel, DeliveryError};
use crate::domain::{ContactEmail, ContactMessage};

/// Sends contact messages straight to an SMTP relay.
pub struct SmtpRelay {
    transport: Arc<SmtpTransport>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpRelay {
    /// With credentials the relay is reached over STARTTLS; without them the connection is plain
    /// and unauthenticated, which only suits a local catcher such as MailHog.
    pub fn new(
        host: &str,
        port: u16,
        credentials: Option<Credentials>,
        sender: &ContactEmail,
        recipient: &ContactEmail,
        timeout: std::time::Duration,
    ) -> Result<Self, anyhow::Error> {
        let builder = match credentials {
            Some(credentials) => SmtpTransport::starttls_relay(host)
                .with_context(|| format!("Failed to configure the SMTP relay at {}", host))?
                .credentials(credentials),
            None => SmtpTransport::builder_dangerous(host),
        };
        let transport = builder.port(port).timeout(Some(timeout)).build();

        let sender = sender
            .as_ref()
            .parse()
            .context("The configured sender is not a valid mailbox")?;
        let recipient = recipient
            .as_ref()
            .parse()
            .context("The configured recipient is not a valid mailbox")?;

        Ok(Self {
            transport: Arc::new(transport),
            sender,
            recipient,
        })
    }

    fn build_email(&self, message: &ContactMessage) -> Result<Message, anyhow::Error> {
        let reply_to: Mailbox = message
            .reply_to
            .parse()
            .context("The submitter's address is not a valid mailbox")?;
        Message::builder()
            .from(Mailbox::new(
                Some(message.from_name.clone()),
                self.sender.email.clone(),
            ))
            .reply_to(reply_to)
            .to(self.recipient.clone())
            .subject(message.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                message.text_body(),
                message.html_body(),
            ))
            .context("Failed to build the contact email")
    }
}

#[async_trait::async_trait]
impl DeliveryChannel for SmtpRelay {
    #[tracing::instrument(name = "Deliver contact message over SMTP", skip_all)]
    async fn deliver(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        let email = self.build_email(message)?;
        let transport = Arc::clone(&self.transport);

        // `SmtpTransport` blocks, keep it off the async workers
        spawn_blocking_with_tracing(move || transport.send(&email))
            .await
            .context("The SMTP send task panicked")?
            .map_err(|e| {
                if e.is_permanent() {
                    DeliveryError::Rejected(e.into())
                } else {
                    DeliveryError::Transport(e.into())
                }
            })?;

        Ok(())
    }
}
