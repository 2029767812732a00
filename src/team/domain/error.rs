//! Error types for team domain validation and membership rules.

use super::TeamId;
use crate::identity::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating teams.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The team name exceeds the storage limit.
    #[error("team name exceeds 50 character limit: {0}")]
    TeamNameTooLong(String),

    /// The team description exceeds the storage limit.
    #[error("team description exceeds 500 character limit")]
    DescriptionTooLong,

    /// The acting user is not the team admin.
    #[error("user {user_id} is not the admin of team {team_id}")]
    NotAdmin {
        /// Team the operation targeted.
        team_id: TeamId,
        /// User who attempted it.
        user_id: UserId,
    },

    /// The referenced user is not a member of the team.
    #[error("user {user_id} is not a member of team {team_id}")]
    NotAMember {
        /// Team the operation targeted.
        team_id: TeamId,
        /// User who is not a member.
        user_id: UserId,
    },

    /// The admin cannot be removed from the team; transfer the role first.
    #[error("admin {user_id} cannot be removed from team {team_id}")]
    CannotRemoveAdmin {
        /// Team the operation targeted.
        team_id: TeamId,
        /// The admin listed for removal.
        user_id: UserId,
    },

    /// The admin must name a successor before leaving.
    #[error("admin of team {0} must choose a successor before leaving")]
    SuccessorRequired(TeamId),

    /// The admin tried to name themselves as their own successor.
    #[error("admin {user_id} cannot succeed themselves in team {team_id}")]
    SelfSuccession {
        /// Team the operation targeted.
        team_id: TeamId,
        /// The leaving admin.
        user_id: UserId,
    },
}
