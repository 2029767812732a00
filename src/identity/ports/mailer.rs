//! Outbound port for activation emails.
//!
//! Delivery is owned by an external notification sender; the core only
//! composes the message.

use crate::identity::domain::EmailAddress;
use async_trait::async_trait;
use thiserror::Error;

/// A rendered activation email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEmail {
    /// Recipient address.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Plain-text body containing the activation link.
    pub body: String,
}

/// Delivery failure reported by a mailer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("activation email delivery failed: {0}")]
pub struct MailerError(pub String);

/// Activation email delivery contract.
#[async_trait]
pub trait ActivationMailer: Send + Sync {
    /// Delivers an activation email.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError`] when the message cannot be handed off.
    async fn send_activation(&self, email: &ActivationEmail) -> Result<(), MailerError>;
}
