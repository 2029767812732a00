//! Invitation workflow: invite, accept, reject and pending-invite lookup.

use super::membership::{ensure_users_exist, load_team, modify_team};
use super::TeamServiceResult;
use crate::identity::{domain::UserId, ports::UserRepository};
use crate::team::{
    domain::{InviteOutcome, Team, TeamId},
    ports::{TeamRepository, TeamWrite},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Per-user invitation orchestration service.
#[derive(Clone)]
pub struct InvitationService<T, U, C>
where
    T: TeamRepository,
    U: UserRepository,
    C: Clock + Send + Sync + 'static,
{
    teams: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, U, C> InvitationService<T, U, C>
where
    T: TeamRepository,
    U: UserRepository,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new invitation service.
    #[must_use]
    pub const fn new(teams: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            teams,
            users,
            clock,
        }
    }

    /// Invites a user to the team on behalf of the admin. Repeated invites
    /// and invites to existing members change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`super::TeamServiceError`] when the team or user does not
    /// exist or the requester is not the admin.
    pub async fn invite(
        &self,
        team_id: TeamId,
        requester: UserId,
        invitee: UserId,
    ) -> TeamServiceResult<InviteOutcome> {
        load_team(&*self.teams, team_id)
            .await?
            .ensure_admin(requester)?;
        ensure_users_exist(&*self.users, std::iter::once(invitee)).await?;

        let clock = Arc::clone(&self.clock);
        let outcome = modify_team(&*self.teams, team_id, move |team| {
            team.ensure_admin(requester)?;
            let outcome = team.invite(invitee, &*clock);
            let write = if outcome == InviteOutcome::Invited {
                TeamWrite::Save
            } else {
                TeamWrite::Unchanged
            };
            Ok((write, outcome))
        })
        .await?;
        if outcome == InviteOutcome::Invited {
            info!(team_id = %team_id, user_id = %invitee, "user invited");
        } else {
            debug!(team_id = %team_id, user_id = %invitee, ?outcome, "invite skipped");
        }
        Ok(outcome)
    }

    /// Accepts the user's pending invite, making them a member.
    ///
    /// Returns `false` when the user holds no invite for the team.
    ///
    /// # Errors
    ///
    /// Returns [`super::TeamServiceError`] when the team does not exist or
    /// the update fails.
    pub async fn accept(&self, user: UserId, team_id: TeamId) -> TeamServiceResult<bool> {
        let clock = Arc::clone(&self.clock);
        let changed = modify_team(&*self.teams, team_id, move |team| {
            let changed = team.accept_invite(user, &*clock);
            let write = if changed {
                TeamWrite::Save
            } else {
                TeamWrite::Unchanged
            };
            Ok((write, changed))
        })
        .await?;
        if !changed {
            debug!(team_id = %team_id, user_id = %user, "no pending invite to accept");
            return Ok(false);
        }
        info!(team_id = %team_id, user_id = %user, "invite accepted");
        Ok(true)
    }

    /// Rejects the user's pending invite without touching membership.
    ///
    /// Returns `false` when the user holds no invite for the team.
    ///
    /// # Errors
    ///
    /// Returns [`super::TeamServiceError`] when the team does not exist or
    /// the update fails.
    pub async fn reject(&self, user: UserId, team_id: TeamId) -> TeamServiceResult<bool> {
        let clock = Arc::clone(&self.clock);
        let changed = modify_team(&*self.teams, team_id, move |team| {
            let changed = team.reject_invite(user, &*clock);
            let write = if changed {
                TeamWrite::Save
            } else {
                TeamWrite::Unchanged
            };
            Ok((write, changed))
        })
        .await?;
        if !changed {
            debug!(team_id = %team_id, user_id = %user, "no pending invite to reject");
            return Ok(false);
        }
        info!(team_id = %team_id, user_id = %user, "invite rejected");
        Ok(true)
    }

    /// Lists the teams that hold a pending invite for the user.
    ///
    /// # Errors
    ///
    /// Returns [`super::TeamServiceError`] when the lookup fails.
    pub async fn pending_invites(&self, user: UserId) -> TeamServiceResult<Vec<Team>> {
        Ok(self.teams.list_invites_for(user).await?)
    }
}
