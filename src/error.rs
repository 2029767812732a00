//! Crate-wide error classification.
//!
//! Each module keeps its own `thiserror` enums. [`ErrorKind`] collapses them
//! into the small taxonomy the calling web layer maps onto user-facing
//! responses.

use std::fmt;

/// Coarse classification shared by every service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A field-level rule was violated (blank title, past due date, bad
    /// username format, ...).
    Validation,
    /// The acting user lacks the role the operation requires.
    PermissionDenied,
    /// A referenced user, team or task does not exist.
    NotFound,
    /// A referenced user is not a member of the team where membership is
    /// required.
    InvalidMember,
    /// A uniqueness constraint (username, email, team name) was violated.
    Conflict,
    /// The store failed.
    Persistence,
}

impl ErrorKind {
    /// Returns a stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::InvalidMember => "invalid_member",
            Self::Conflict => "conflict",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
