//! Error types for identity domain validation.

use std::fmt;
use thiserror::Error;

/// Which half of a person's name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePart {
    /// Given name.
    First,
    /// Family name.
    Last,
}

impl fmt::Display for NamePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first name"),
            Self::Last => f.write_str("last name"),
        }
    }
}

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is not `@` followed by at least three word characters.
    #[error(
        "username '{0}' must consist of @ followed by at least three alphanumericals"
    )]
    InvalidUsername(String),

    /// The username exceeds the storage limit.
    #[error("username exceeds 30 character limit: {0}")]
    UsernameTooLong(String),

    /// A name part is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyName(NamePart),

    /// A name part exceeds the storage limit.
    #[error("{0} exceeds 50 character limit")]
    NameTooLong(NamePart),

    /// The email address is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The activation token is malformed, expired or does not match.
    #[error("activation token is invalid or has expired")]
    InvalidActivationToken,
}
