//! In-memory repository for team aggregates.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::team::{
    domain::{Team, TeamId, TeamName},
    ports::{TeamRepository, TeamRepositoryError, TeamRepositoryResult, TeamWrite},
};

/// Thread-safe in-memory team repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    state: Arc<RwLock<InMemoryTeamState>>,
}

#[derive(Debug, Default)]
struct InMemoryTeamState {
    teams: HashMap<TeamId, Team>,
    name_index: HashMap<TeamName, TeamId>,
}

impl InMemoryTeamRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TeamRepositoryError {
    TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_name(mut teams: Vec<Team>) -> Vec<Team> {
    teams.sort_by(|left, right| left.name().cmp(right.name()));
    teams
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.teams.contains_key(&team.id()) {
            return Err(TeamRepositoryError::DuplicateTeam(team.id()));
        }
        if state.name_index.contains_key(team.name()) {
            return Err(TeamRepositoryError::DuplicateTeamName(team.name().clone()));
        }

        state.name_index.insert(team.name().clone(), team.id());
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn modify<F, R, E>(&self, id: TeamId, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut Team) -> Result<(TeamWrite, R), E> + Send + 'static,
        R: Send + 'static,
        E: From<TeamRepositoryError> + Send + 'static,
    {
        let mut state = self.state.write().map_err(lock_error)?;
        let mut team = state
            .teams
            .get(&id)
            .cloned()
            .ok_or(TeamRepositoryError::NotFound(id))?;

        let (write, result) = change(&mut team)?;
        match write {
            TeamWrite::Unchanged => {}
            TeamWrite::Save => {
                state.teams.insert(id, team);
            }
            TeamWrite::Delete => {
                state.teams.remove(&id);
                state.name_index.remove(team.name());
            }
        }
        Ok(result)
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.teams.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &TeamName) -> TeamRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .name_index
            .get(name)
            .and_then(|id| state.teams.get(id))
            .cloned())
    }

    async fn list_for_member(&self, user: UserId) -> TeamRepositoryResult<Vec<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(sorted_by_name(
            state
                .teams
                .values()
                .filter(|team| team.is_member(user))
                .cloned()
                .collect(),
        ))
    }

    async fn list_invites_for(&self, user: UserId) -> TeamRepositoryResult<Vec<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(sorted_by_name(
            state
                .teams
                .values()
                .filter(|team| team.invitees().contains(&user))
                .cloned()
                .collect(),
        ))
    }
}
