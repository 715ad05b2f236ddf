//! Outbound delivery of contact messages.
//!
//! Each backend implements [`DeliveryChannel`]; which one runs is decided by configuration at
//! startup, so the submission flow never knows which provider it is talking to.
mod postmark;
mod smtp;
mod web3forms;

pub use postmark::PostmarkClient;
pub use smtp::SmtpRelay;
pub use web3forms::Web3FormsClient;

use std::fmt::{Debug, Formatter};

use crate::domain::ContactMessage;
use crate::error_handling::error_chain_fmt;

#[async_trait::async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Makes exactly one attempt to hand `message` to the provider.
    async fn deliver(&self, message: &ContactMessage) -> Result<(), DeliveryError>;
}

#[derive(thiserror::Error)]
pub enum DeliveryError {
    #[error("Failed to reach the delivery service")]
    Transport(#[source] anyhow::Error),
    #[error("The delivery service refused the message")]
    Rejected(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for DeliveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
