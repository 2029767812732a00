//! Validated user handle.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username, matching the `VARCHAR(30)` column.
const MAX_USERNAME_LENGTH: usize = 30;

/// Minimum number of word characters after the leading `@`.
const MIN_HANDLE_LENGTH: usize = 3;

/// User handle of the form `@` followed by at least three word characters
/// (letters, digits or underscores), e.g. `@johndoe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::UsernameTooLong`] when the handle
    /// exceeds 30 characters, or [`IdentityDomainError::InvalidUsername`]
    /// when it does not match the `@` plus word-characters format.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.chars().count() > MAX_USERNAME_LENGTH {
            return Err(IdentityDomainError::UsernameTooLong(raw));
        }

        let Some(handle) = normalized.strip_prefix('@') else {
            return Err(IdentityDomainError::InvalidUsername(raw));
        };
        let is_valid = handle.chars().count() >= MIN_HANDLE_LENGTH
            && handle.chars().all(|c| c.is_alphanumeric() || c == '_');
        if !is_valid {
            return Err(IdentityDomainError::InvalidUsername(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
