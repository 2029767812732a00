//! User aggregate root.

use super::{EmailAddress, IdentityDomainError, NamePart, UserId, Username, hex_encode};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Maximum length for each name part, matching the `VARCHAR(50)` columns.
const MAX_NAME_LENGTH: usize = 50;

/// Non-blank first or last name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Creates a validated name part.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when the value is blank or
    /// [`IdentityDomainError::NameTooLong`] when it exceeds 50 characters.
    pub fn new(part: NamePart, value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyName(part));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(IdentityDomainError::NameTooLong(part));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated, user-editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Unique handle.
    pub username: Username,
    /// Given name.
    pub first_name: PersonName,
    /// Family name.
    pub last_name: PersonName,
    /// Unique email address.
    pub email: EmailAddress,
}

impl UserProfile {
    /// Validates raw profile input.
    ///
    /// # Errors
    ///
    /// Returns the first [`IdentityDomainError`] raised by the field types.
    pub fn parse(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        Ok(Self {
            username: Username::new(username)?,
            first_name: PersonName::new(NamePart::First, first_name)?,
            last_name: PersonName::new(NamePart::Last, last_name)?,
            email: EmailAddress::new(email)?,
        })
    }
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted handle.
    pub username: Username,
    /// Persisted given name.
    pub first_name: PersonName,
    /// Persisted family name.
    pub last_name: PersonName,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Whether the account has been activated.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, inactive user from sign-up data.
    #[must_use]
    pub fn register(profile: UserProfile, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let UserProfile {
            username,
            first_name,
            last_name,
            email,
        } = profile;
        Self {
            id: UserId::new(),
            username,
            first_name,
            last_name,
            email,
            is_active: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            is_active: data.is_active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the user handle.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the given name.
    #[must_use]
    pub const fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub const fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns whether the account has been activated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the gravatar URL for this user's email at the given pixel
    /// size, falling back to the mystery-person image.
    #[must_use]
    pub fn gravatar_url(&self, size: u32) -> String {
        let normalized = self.email.as_str().trim().to_lowercase();
        let digest = hex_encode(&Sha256::digest(normalized.as_bytes()));
        format!("https://www.gravatar.com/avatar/{digest}?size={size}&default=mp")
    }

    /// Marks the account as active.
    ///
    /// Returns `false` without touching timestamps when it already was.
    pub fn activate(&mut self, clock: &impl Clock) -> bool {
        if self.is_active {
            return false;
        }
        self.is_active = true;
        self.touch(clock);
        true
    }

    /// Replaces the editable profile fields.
    pub fn update_profile(&mut self, profile: UserProfile, clock: &impl Clock) {
        let UserProfile {
            username,
            first_name,
            last_name,
            email,
        } = profile;
        self.username = username;
        self.first_name = first_name;
        self.last_name = last_name;
        self.email = email;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
