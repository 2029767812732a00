//! Account activation tokens.
//!
//! A token is `"{issued_at_hex}-{digest_hex}"` where the digest is SHA-256
//! over the signing secret, the user id, the issue timestamp and the
//! account's active flag. Activating the account changes the flag, so a
//! token can never be replayed once it has been used.

use super::{IdentityDomainError, User, hex_encode};
use chrono::TimeDelta;
use mockable::Clock;
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque activation token sent to the user by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationToken(String);

impl ActivationToken {
    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues and verifies activation tokens with a shared secret.
#[derive(Clone)]
pub struct ActivationTokenSigner {
    secret: String,
    ttl: TimeDelta,
}

impl fmt::Debug for ActivationTokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationTokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl ActivationTokenSigner {
    /// Creates a signer with the given secret and token lifetime.
    #[must_use]
    pub fn new(secret: impl Into<String>, ttl: TimeDelta) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Issues a token for the user's current state.
    #[must_use]
    pub fn issue(&self, user: &User, clock: &impl Clock) -> ActivationToken {
        let issued_at = clock.utc().timestamp();
        let digest = self.digest(user, issued_at);
        ActivationToken(format!("{issued_at:x}-{digest}"))
    }

    /// Verifies a token against the user's current state.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidActivationToken`] when the token
    /// is malformed, issued in the future, older than the configured lifetime,
    /// or does not match the user.
    pub fn verify(
        &self,
        user: &User,
        token: &str,
        clock: &impl Clock,
    ) -> Result<(), IdentityDomainError> {
        let (issued_hex, presented_digest) = token
            .split_once('-')
            .ok_or(IdentityDomainError::InvalidActivationToken)?;
        let issued_at = i64::from_str_radix(issued_hex, 16)
            .map_err(|_| IdentityDomainError::InvalidActivationToken)?;

        let now = clock.utc().timestamp();
        let age = now
            .checked_sub(issued_at)
            .ok_or(IdentityDomainError::InvalidActivationToken)?;
        if age < 0 || age > self.ttl.num_seconds() {
            return Err(IdentityDomainError::InvalidActivationToken);
        }

        let expected = self.digest(user, issued_at);
        if !constant_time_eq(expected.as_bytes(), presented_digest.as_bytes()) {
            return Err(IdentityDomainError::InvalidActivationToken);
        }
        Ok(())
    }

    fn digest(&self, user: &User, issued_at: i64) -> String {
        let hash = Sha256::new()
            .chain_update(self.secret.as_bytes())
            .chain_update(user.id().to_string().as_bytes())
            .chain_update(issued_at.to_string().as_bytes())
            .chain_update(if user.is_active() { b"1" } else { b"0" })
            .finalize();
        hex_encode(&hash)
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
