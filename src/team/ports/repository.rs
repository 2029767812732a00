//! Repository port for team aggregates, including members and invites.

use crate::identity::domain::UserId;
use crate::persistence::BlockingError;
use crate::team::domain::{Team, TeamId, TeamName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for team repository operations.
pub type TeamRepositoryResult<T> = Result<T, TeamRepositoryError>;

/// Team persistence contract.
///
/// Implementations persist the aggregate as a unit: the team row, its member
/// set and its invite set change together or not at all.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::DuplicateTeam`] when the ID exists or
    /// [`TeamRepositoryError::DuplicateTeamName`] when the name is taken.
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()>;

    /// Applies `change` to the stored team and writes the outcome as one
    /// atomic step.
    ///
    /// The closure sees the current stored state and decides, through the
    /// returned [`TeamWrite`], whether the team is kept as is, saved or
    /// deleted. No other `modify` on the same team interleaves between the
    /// read and the write. When the closure fails nothing is written.
    ///
    /// # Errors
    ///
    /// Returns the closure's error unchanged, or
    /// [`TeamRepositoryError::NotFound`] (converted into `E`) when the team
    /// does not exist.
    async fn modify<F, R, E>(&self, id: TeamId, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut Team) -> Result<(TeamWrite, R), E> + Send + 'static,
        R: Send + 'static,
        E: From<TeamRepositoryError> + Send + 'static;

    /// Finds a team by identifier.
    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>>;

    /// Finds a team by its unique name.
    async fn find_by_name(&self, name: &TeamName) -> TeamRepositoryResult<Option<Team>>;

    /// Lists the teams the user belongs to.
    async fn list_for_member(&self, user: UserId) -> TeamRepositoryResult<Vec<Team>>;

    /// Lists the teams holding a pending invite for the user.
    async fn list_invites_for(&self, user: UserId) -> TeamRepositoryResult<Vec<Team>>;
}

/// What [`TeamRepository::modify`] persists once its change has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamWrite {
    /// Leave the stored team untouched.
    Unchanged,
    /// Persist the changed aggregate.
    Save,
    /// Delete the team together with its members and invites.
    Delete,
}

/// Errors returned by team repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TeamRepositoryError {
    /// A team with the same identifier already exists.
    #[error("duplicate team identifier: {0}")]
    DuplicateTeam(TeamId),

    /// Another team already uses the name.
    #[error("team name already taken: {0}")]
    DuplicateTeamName(TeamName),

    /// The team was not found.
    #[error("team not found: {0}")]
    NotFound(TeamId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TeamRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<BlockingError> for TeamRepositoryError {
    fn from(err: BlockingError) -> Self {
        Self::persistence(err)
    }
}
