//! Validated team name and description.

use super::TeamDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a team name, matching the `VARCHAR(50)` column.
const MAX_NAME_LENGTH: usize = 50;

/// Maximum length for a team description.
const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Unique, non-blank team name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a validated team name. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyTeamName`] when blank or
    /// [`TeamDomainError::TeamNameTooLong`] past 50 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TeamDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TeamDomainError::EmptyTeamName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(TeamDomainError::TeamNameTooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text team description; may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamDescription(String);

impl TeamDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::DescriptionTooLong`] past 500 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TeamDomainError> {
        let raw = value.into();
        if raw.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(TeamDomainError::DescriptionTooLong);
        }
        Ok(Self(raw))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
