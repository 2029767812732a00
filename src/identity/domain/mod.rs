//! Domain model for user identity.

mod activation;
mod email;
mod error;
mod ids;
mod user;
mod username;

pub use activation::{ActivationToken, ActivationTokenSigner};
pub use email::EmailAddress;
pub use error::{IdentityDomainError, NamePart};
pub use ids::UserId;
pub use user::{PersistedUserData, PersonName, User, UserProfile};
pub use username::Username;

/// Lowercase hexadecimal rendering of a digest.
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            out.push_str(&format!("{byte:02x}"));
            out
        })
}
