//! Shared world state for team membership BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use gecko::{
    error::ErrorKind,
    identity::{
        adapters::memory::InMemoryUserRepository,
        domain::{User, UserId},
    },
    settings::TeamSettings,
    task::adapters::memory::InMemoryTaskRepository,
    team::{
        adapters::memory::InMemoryTeamRepository,
        domain::{SuccessionPolicy, TeamId},
        services::{InvitationService, TeamService},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Team service type used by the BDD world.
pub type TestTeamService = TeamService<
    InMemoryTeamRepository,
    InMemoryUserRepository,
    InMemoryTaskRepository,
    DefaultClock,
>;

/// Invitation service type used by the BDD world.
pub type TestInvitationService =
    InvitationService<InMemoryTeamRepository, InMemoryUserRepository, DefaultClock>;

/// Scenario world for team membership behaviour tests.
pub struct TeamMembershipWorld {
    pub user_repository: Arc<InMemoryUserRepository>,
    pub teams: TestTeamService,
    pub invitations: TestInvitationService,
    pub users: HashMap<String, User>,
    pub team_id: Option<TeamId>,
    pub last_error: Option<ErrorKind>,
}

impl TeamMembershipWorld {
    /// Creates a world with empty stores and the random succession policy.
    #[must_use]
    pub fn new() -> Self {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let team_repository = Arc::new(InMemoryTeamRepository::new());
        let clock = Arc::new(DefaultClock);

        Self {
            teams: TeamService::new(
                Arc::clone(&team_repository),
                Arc::clone(&user_repository),
                Arc::new(InMemoryTaskRepository::new()),
                Arc::clone(&clock),
                TeamSettings {
                    succession: SuccessionPolicy::Random,
                },
            ),
            invitations: InvitationService::new(
                team_repository,
                Arc::clone(&user_repository),
                clock,
            ),
            user_repository,
            users: HashMap::new(),
            team_id: None,
            last_error: None,
        }
    }

    /// Looks up a user registered earlier in the scenario by handle.
    pub fn user_id(&self, handle: &str) -> Result<UserId, eyre::Report> {
        self.users
            .get(handle)
            .map(User::id)
            .ok_or_else(|| eyre::eyre!("unknown user {handle} in scenario world"))
    }

    /// Returns the team created in the background.
    pub fn team_id(&self) -> Result<TeamId, eyre::Report> {
        self.team_id
            .ok_or_else(|| eyre::eyre!("missing team in scenario world"))
    }
}

impl Default for TeamMembershipWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TeamMembershipWorld {
    TeamMembershipWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
