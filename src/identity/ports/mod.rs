//! Port contracts for user identity.

pub mod mailer;
pub mod repository;

pub use mailer::{ActivationEmail, ActivationMailer, MailerError};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
