//! Error type shared by the team services.

use crate::error::ErrorKind;
use crate::identity::{domain::UserId, ports::UserRepositoryError};
use crate::task::ports::TaskRepositoryError;
use crate::team::{
    domain::{TeamDomainError, TeamId},
    ports::TeamRepositoryError,
};
use thiserror::Error;

/// Service-level errors for team operations.
#[derive(Debug, Error)]
pub enum TeamServiceError {
    /// Domain validation or a membership rule failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),
    /// Team repository operation failed.
    #[error(transparent)]
    Repository(#[from] TeamRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Removing the team's tasks failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// No team has the given identifier.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),
    /// No user has the given identifier.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
}

impl TeamServiceError {
    /// Classifies the error for the calling layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(TeamDomainError::NotAdmin { .. }) => ErrorKind::PermissionDenied,
            Self::Domain(
                TeamDomainError::NotAMember { .. }
                | TeamDomainError::CannotRemoveAdmin { .. }
                | TeamDomainError::SelfSuccession { .. },
            ) => ErrorKind::InvalidMember,
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(
                TeamRepositoryError::DuplicateTeam(_) | TeamRepositoryError::DuplicateTeamName(_),
            ) => ErrorKind::Conflict,
            Self::Repository(TeamRepositoryError::NotFound(_))
            | Self::Users(UserRepositoryError::NotFound(_))
            | Self::TeamNotFound(_)
            | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Users(_) | Self::Tasks(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for team service operations.
pub type TeamServiceResult<T> = Result<T, TeamServiceError>;
