//! Dashboard listings and form choice queries.

use crate::dashboard::domain::{DashboardDomainError, TaskQuery};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::task::{
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::team::{
    domain::{Team, TeamId},
    ports::{TeamRepository, TeamRepositoryError},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Which teams' members may be offered as assignees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssigneeScope {
    /// Members of one team, for forms bound to that team.
    Team(TeamId),
    /// Members of every team the user belongs to.
    UserTeams(UserId),
}

/// Errors returned by dashboard queries.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The query could not be built.
    #[error(transparent)]
    Query(#[from] DashboardDomainError),
    /// Team lookup failed.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// No team has the given identifier.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),
}

impl DashboardError {
    /// Classifies the error for the calling layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Query(_) => ErrorKind::Validation,
            Self::TeamNotFound(_) => ErrorKind::NotFound,
            Self::Teams(_) | Self::Tasks(_) | Self::Users(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for dashboard queries.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Read-only query service over teams, tasks and users.
#[derive(Clone)]
pub struct DashboardService<T, K, U>
where
    T: TeamRepository,
    K: TaskRepository,
    U: UserRepository,
{
    teams: Arc<T>,
    tasks: Arc<K>,
    users: Arc<U>,
}

impl<T, K, U> DashboardService<T, K, U>
where
    T: TeamRepository,
    K: TaskRepository,
    U: UserRepository,
{
    /// Creates a new dashboard service.
    #[must_use]
    pub const fn new(teams: Arc<T>, tasks: Arc<K>, users: Arc<U>) -> Self {
        Self { teams, tasks, users }
    }

    /// Lists the tasks of every team the user belongs to, filtered and
    /// ordered by the query.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] when a repository lookup fails.
    pub async fn tasks_for_user(
        &self,
        user: UserId,
        query: &TaskQuery,
    ) -> DashboardResult<Vec<Task>> {
        let team_ids: Vec<TeamId> = self
            .teams
            .list_for_member(user)
            .await?
            .iter()
            .map(Team::id)
            .collect();
        let tasks = self.tasks.list_for_teams(&team_ids).await?;
        let total = tasks.len();
        let selected = query.apply(tasks);
        debug!(user_id = %user, total, selected = selected.len(), "dashboard tasks listed");
        Ok(selected)
    }

    /// Lists the teams the user belongs to, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] when the lookup fails.
    pub async fn teams_for_user(&self, user: UserId) -> DashboardResult<Vec<Team>> {
        let mut teams = self.teams.list_for_member(user).await?;
        teams.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(teams)
    }

    /// Lists the users that may be assigned a task in the given scope,
    /// ordered by last then first name.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] when the team does not exist or a lookup
    /// fails.
    pub async fn assignee_choices(&self, scope: AssigneeScope) -> DashboardResult<Vec<User>> {
        let members: BTreeSet<UserId> = match scope {
            AssigneeScope::Team(team_id) => self
                .teams
                .find_by_id(team_id)
                .await?
                .ok_or(DashboardError::TeamNotFound(team_id))?
                .members()
                .clone(),
            AssigneeScope::UserTeams(user) => self
                .teams
                .list_for_member(user)
                .await?
                .iter()
                .flat_map(|team| team.members().iter().copied())
                .collect(),
        };
        let ids: Vec<UserId> = members.into_iter().collect();
        Ok(sorted_by_name(self.users.find_many(&ids).await?))
    }

    /// Lists the users who are neither members of the team nor invited to
    /// it, ordered by last then first name.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] when the team does not exist or a lookup
    /// fails.
    pub async fn invite_candidates(&self, team_id: TeamId) -> DashboardResult<Vec<User>> {
        let team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or(DashboardError::TeamNotFound(team_id))?;
        let candidates = self
            .users
            .list_all()
            .await?
            .into_iter()
            .filter(|user| !team.is_member(user.id()) && !team.invitees().contains(&user.id()))
            .collect();
        Ok(sorted_by_name(candidates))
    }
}

fn sorted_by_name(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|left, right| {
        (left.last_name().as_str(), left.first_name().as_str(), left.username().as_str()).cmp(&(
            right.last_name().as_str(),
            right.first_name().as_str(),
            right.username().as_str(),
        ))
    });
    users
}
