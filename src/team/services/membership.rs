//! Team lifecycle service: creation, admin handover, membership changes and
//! deletion.

use super::{TeamServiceError, TeamServiceResult};
use crate::identity::{domain::UserId, ports::UserRepository};
use crate::settings::TeamSettings;
use crate::task::ports::TaskRepository;
use crate::team::{
    domain::{
        InviteOutcome, LeaveOutcome, SuccessionPolicy, Team, TeamDescription, TeamId, TeamName,
    },
    ports::{TeamRepository, TeamRepositoryError, TeamWrite},
};
use mockable::Clock;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Request payload for creating a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    name: String,
    description: String,
    admin: UserId,
    invitees: Vec<UserId>,
}

impl CreateTeamRequest {
    /// Creates a request for a team administered by `admin`.
    #[must_use]
    pub fn new(name: impl Into<String>, admin: UserId) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            admin,
            invitees: Vec::new(),
        }
    }

    /// Sets the team description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the users invited on creation.
    #[must_use]
    pub fn with_invitees(mut self, invitees: impl IntoIterator<Item = UserId>) -> Self {
        self.invitees = invitees.into_iter().collect();
        self
    }
}

/// Team lifecycle orchestration service.
#[derive(Clone)]
pub struct TeamService<T, U, K, C>
where
    T: TeamRepository,
    U: UserRepository,
    K: TaskRepository,
    C: Clock + Send + Sync + 'static,
{
    teams: Arc<T>,
    users: Arc<U>,
    tasks: Arc<K>,
    clock: Arc<C>,
    succession: SuccessionPolicy,
}

impl<T, U, K, C> TeamService<T, U, K, C>
where
    T: TeamRepository,
    U: UserRepository,
    K: TaskRepository,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new team service.
    #[must_use]
    pub const fn new(
        teams: Arc<T>,
        users: Arc<U>,
        tasks: Arc<K>,
        clock: Arc<C>,
        settings: TeamSettings,
    ) -> Self {
        Self {
            teams,
            users,
            tasks,
            clock,
            succession: settings.succession,
        }
    }

    /// Creates a team with the requester as admin and sole member, then
    /// invites the requested users.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when the name or description is invalid,
    /// the name is taken, or the admin or an invitee does not exist.
    pub async fn create_team(&self, request: CreateTeamRequest) -> TeamServiceResult<Team> {
        let CreateTeamRequest {
            name,
            description,
            admin,
            invitees,
        } = request;
        let team_name = TeamName::new(name)?;
        let team_description = TeamDescription::new(description)?;

        ensure_users_exist(&*self.users, std::iter::once(admin).chain(invitees.iter().copied()))
            .await?;
        if self.teams.find_by_name(&team_name).await?.is_some() {
            return Err(TeamRepositoryError::DuplicateTeamName(team_name).into());
        }

        let mut team = Team::new(team_name, team_description, admin, &*self.clock);
        for invitee in invitees {
            team.invite(invitee, &*self.clock);
        }
        self.teams.store(&team).await?;
        info!(
            team_id = %team.id(),
            team_name = %team.name(),
            admin = %admin,
            invites = team.invitees().len(),
            "team created"
        );
        Ok(team)
    }

    /// Hands the admin role to another member.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when the team does not exist, the
    /// requester is not the admin, or the new admin is not a member.
    pub async fn transfer_admin(
        &self,
        team_id: TeamId,
        requester: UserId,
        new_admin: UserId,
    ) -> TeamServiceResult<Team> {
        let clock = Arc::clone(&self.clock);
        let team = modify_team(&*self.teams, team_id, move |team| {
            team.transfer_admin(requester, new_admin, &*clock)?;
            Ok((TeamWrite::Save, team.clone()))
        })
        .await?;
        info!(team_id = %team_id, new_admin = %new_admin, "team admin transferred");
        Ok(team)
    }

    /// Invites candidates to the team on behalf of the admin. Existing
    /// members and already-invited users are reported but left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when the team does not exist, the
    /// requester is not the admin, or a candidate does not exist. The team
    /// is unchanged on error.
    pub async fn add_members(
        &self,
        team_id: TeamId,
        requester: UserId,
        candidates: &[UserId],
    ) -> TeamServiceResult<Vec<(UserId, InviteOutcome)>> {
        self.load_team(team_id).await?.ensure_admin(requester)?;
        ensure_users_exist(&*self.users, candidates.iter().copied()).await?;

        let clock = Arc::clone(&self.clock);
        let listed = candidates.to_vec();
        let outcomes = modify_team(&*self.teams, team_id, move |team| {
            let outcomes = team.add_members(requester, &listed, &*clock)?;
            let write = if outcomes.iter().any(|(_, outcome)| *outcome == InviteOutcome::Invited) {
                TeamWrite::Save
            } else {
                TeamWrite::Unchanged
            };
            Ok((write, outcomes))
        })
        .await?;
        let invited = outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == InviteOutcome::Invited)
            .count();
        if invited == 0 {
            debug!(team_id = %team_id, "no new invites recorded");
        } else {
            info!(team_id = %team_id, invited, "team invites recorded");
        }
        Ok(outcomes)
    }

    /// Removes members on behalf of the admin. Listed users who are not
    /// members are ignored. Returns the users actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when the team does not exist, the
    /// requester is not the admin, or the admin is listed for removal.
    pub async fn remove_members(
        &self,
        team_id: TeamId,
        requester: UserId,
        members: &[UserId],
    ) -> TeamServiceResult<Vec<UserId>> {
        let clock = Arc::clone(&self.clock);
        let listed = members.to_vec();
        let removed = modify_team(&*self.teams, team_id, move |team| {
            let removed = team.remove_members(requester, &listed, &*clock)?;
            let write = if removed.is_empty() {
                TeamWrite::Unchanged
            } else {
                TeamWrite::Save
            };
            Ok((write, removed))
        })
        .await?;
        if removed.is_empty() {
            debug!(team_id = %team_id, "no listed user was a member");
            return Ok(removed);
        }
        info!(team_id = %team_id, removed = removed.len(), "team members removed");
        Ok(removed)
    }

    /// Removes the requester from the team.
    ///
    /// A leaving admin hands the role to `successor` when given, otherwise
    /// to a member chosen by the configured [`SuccessionPolicy`]. When the
    /// sole member leaves, the team and its tasks are deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when the team does not exist, the
    /// requester or successor is not a member, or no successor can be
    /// chosen under the configured policy.
    pub async fn leave_team(
        &self,
        team_id: TeamId,
        requester: UserId,
        successor: Option<UserId>,
    ) -> TeamServiceResult<LeaveOutcome> {
        let clock = Arc::clone(&self.clock);
        let policy = self.succession;
        let outcome = modify_team(&*self.teams, team_id, move |team| {
            team.ensure_member(requester)?;
            let chosen = successor.or_else(|| choose_successor(policy, team, requester));
            let outcome = team.leave(requester, chosen, &*clock)?;
            let write = if outcome == LeaveOutcome::Disbanded {
                TeamWrite::Delete
            } else {
                TeamWrite::Save
            };
            Ok((write, outcome))
        })
        .await?;
        match outcome {
            LeaveOutcome::Disbanded => {
                self.sweep_tasks(team_id).await?;
                info!(team_id = %team_id, user_id = %requester, "last member left; team disbanded");
            }
            LeaveOutcome::AdminHandedOver { new_admin } => {
                info!(
                    team_id = %team_id,
                    user_id = %requester,
                    new_admin = %new_admin,
                    "admin left team and handed over"
                );
            }
            LeaveOutcome::Left => {
                info!(team_id = %team_id, user_id = %requester, "member left team");
            }
        }
        Ok(outcome)
    }

    /// Deletes the team and all of its tasks.
    ///
    /// The team goes first, so a failed deletion leaves its tasks in place.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when the team does not exist or the
    /// requester is not the admin.
    pub async fn delete_team(&self, team_id: TeamId, requester: UserId) -> TeamServiceResult<()> {
        modify_team(&*self.teams, team_id, move |team| {
            team.ensure_admin(requester)?;
            Ok((TeamWrite::Delete, ()))
        })
        .await?;
        self.sweep_tasks(team_id).await?;
        info!(team_id = %team_id, "team deleted");
        Ok(())
    }

    /// Finds a team by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::TeamNotFound`] when no team matches.
    pub async fn find_team(&self, team_id: TeamId) -> TeamServiceResult<Team> {
        self.load_team(team_id).await
    }

    /// Lists the teams the user belongs to, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Repository`] when the lookup fails.
    pub async fn teams_for_member(&self, user: UserId) -> TeamServiceResult<Vec<Team>> {
        Ok(self.teams.list_for_member(user).await?)
    }

    async fn load_team(&self, team_id: TeamId) -> TeamServiceResult<Team> {
        load_team(&*self.teams, team_id).await
    }

    /// Removes the tasks of a team that has already been deleted.
    async fn sweep_tasks(&self, team_id: TeamId) -> TeamServiceResult<()> {
        let deleted_tasks = self.tasks.delete_for_team(team_id).await?;
        debug!(team_id = %team_id, deleted_tasks, "tasks of deleted team swept");
        Ok(())
    }
}

/// Picks a successor for a leaving admin when the caller named none.
fn choose_successor(policy: SuccessionPolicy, team: &Team, leaving: UserId) -> Option<UserId> {
    if !team.is_admin(leaving) {
        return None;
    }
    match policy {
        SuccessionPolicy::Explicit => None,
        SuccessionPolicy::Random => team
            .members_except(leaving)
            .choose(&mut rand::rng())
            .copied(),
    }
}

/// Runs one atomic change against the stored team, reporting a missing team
/// as [`TeamServiceError::TeamNotFound`].
pub(super) async fn modify_team<T, F, R>(
    teams: &T,
    team_id: TeamId,
    change: F,
) -> TeamServiceResult<R>
where
    T: TeamRepository,
    F: FnOnce(&mut Team) -> TeamServiceResult<(TeamWrite, R)> + Send + 'static,
    R: Send + 'static,
{
    teams
        .modify(team_id, change)
        .await
        .map_err(|err| match err {
            TeamServiceError::Repository(TeamRepositoryError::NotFound(id)) => {
                TeamServiceError::TeamNotFound(id)
            }
            other => other,
        })
}

/// Loads a team or reports it missing.
pub(super) async fn load_team<T>(teams: &T, team_id: TeamId) -> TeamServiceResult<Team>
where
    T: TeamRepository + ?Sized,
{
    teams
        .find_by_id(team_id)
        .await?
        .ok_or(TeamServiceError::TeamNotFound(team_id))
}

/// Fails with the first identifier that has no stored user.
pub(super) async fn ensure_users_exist<U>(
    users: &U,
    ids: impl Iterator<Item = UserId>,
) -> TeamServiceResult<()>
where
    U: UserRepository + ?Sized,
{
    let wanted: BTreeSet<UserId> = ids.collect();
    let lookup: Vec<UserId> = wanted.iter().copied().collect();
    let found: BTreeSet<UserId> = users
        .find_many(&lookup)
        .await?
        .iter()
        .map(crate::identity::domain::User::id)
        .collect();
    wanted
        .difference(&found)
        .next()
        .map_or(Ok(()), |missing| Err(TeamServiceError::UserNotFound(*missing)))
}
