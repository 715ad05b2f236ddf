use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::delivery::{DeliveryChannel, DeliveryError};
use crate::domain::{
    ContactMessage, ContactSubmission, SubmissionRequest, SubmissionResult, ValidationError,
};
use crate::error_handling::error_chain_fmt;

/// Validates contact form submissions and relays the valid ones to the site owner.
///
/// Holds no per-submission state, so one instance serves every worker.
pub struct ContactSubmissionHandler {
    channel: Arc<dyn DeliveryChannel>,
    fallback_contact: String,
}

#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Failed to deliver the contact message")]
    DeliveryError(#[source] DeliveryError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<DeliveryError> for SubmitError {
    fn from(e: DeliveryError) -> Self {
        match e {
            DeliveryError::UnexpectedError(e) => SubmitError::UnexpectedError(e),
            e => SubmitError::DeliveryError(e),
        }
    }
}

impl ContactSubmissionHandler {
    pub fn new(channel: Arc<dyn DeliveryChannel>, fallback_contact: String) -> Self {
        Self {
            channel,
            fallback_contact,
        }
    }

    /// Validates `request` and makes a single delivery attempt.
    ///
    /// Nothing is sent unless validation passes. Failures are logged here; callers only need to
    /// turn the error into a [`SubmissionResult`] with [`Self::failure_result`].
    #[tracing::instrument(name = "Submitting a contact message", skip_all)]
    pub async fn handle(&self, request: SubmissionRequest) -> Result<(), SubmitError> {
        let submission = ContactSubmission::try_from(request).map_err(|e| {
            tracing::info!(reason = %e, "Contact submission failed validation");
            SubmitError::from(e)
        })?;
        let message = ContactMessage::from(submission);

        self.channel.deliver(&message).await.map_err(|e| {
            let e = SubmitError::from(e);
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to deliver contact message"
            );
            e
        })?;

        tracing::info!("Contact message delivered");
        Ok(())
    }

    /// Like [`Self::handle`], folded into the result shown to the submitter.
    pub async fn submit(&self, request: SubmissionRequest) -> SubmissionResult {
        match self.handle(request).await {
            Ok(()) => SubmissionResult::sent(),
            Err(e) => self.failure_result(&e),
        }
    }

    /// Validation problems are explained; delivery problems only point at the fallback address.
    pub fn failure_result(&self, e: &SubmitError) -> SubmissionResult {
        match e {
            SubmitError::ValidationError(e) => SubmissionResult::failed(e.to_string()),
            SubmitError::DeliveryError(_) | SubmitError::UnexpectedError(_) => {
                SubmissionResult::failed(format!(
                    "Failed to send message. Please try again later or contact me directly at {}",
                    self.fallback_contact
                ))
            }
        }
    }
}
