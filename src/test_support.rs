//! Shared fixtures for unit tests.

use crate::dashboard::services::DashboardService;
use crate::identity::{
    adapters::memory::InMemoryUserRepository,
    domain::{User, UserId, UserProfile},
    ports::UserRepository,
};
use crate::settings::TeamSettings;
use crate::task::{adapters::memory::InMemoryTaskRepository, services::TaskService};
use crate::team::{
    adapters::memory::InMemoryTeamRepository,
    domain::{SuccessionPolicy, Team},
    ports::TeamRepository,
    services::{CreateTeamRequest, InvitationService, TeamService},
};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock frozen at a settable instant with whole-second precision.
#[derive(Debug)]
pub(crate) struct FixedClock {
    seconds: AtomicI64,
}

impl FixedClock {
    pub(crate) fn at(instant: DateTime<Utc>) -> Self {
        Self {
            seconds: AtomicI64::new(instant.timestamp()),
        }
    }

    pub(crate) fn reference() -> Self {
        Self::at(reference_instant())
    }

    pub(crate) fn advance(&self, delta: TimeDelta) {
        self.seconds.fetch_add(delta.num_seconds(), Ordering::SeqCst);
    }

    /// Current instant shifted by `delta`.
    pub(crate) fn offset(&self, delta: TimeDelta) -> DateTime<Utc> {
        self.utc() + delta
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.seconds.load(Ordering::SeqCst), 0).unwrap_or_default()
    }
}

/// 2026-03-02T09:00:00Z, the instant every fixed clock starts at.
pub(crate) fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// In-memory repositories sharing one fixed clock, with service builders.
#[derive(Debug, Clone)]
pub(crate) struct Workspace {
    pub(crate) users: Arc<InMemoryUserRepository>,
    pub(crate) teams: Arc<InMemoryTeamRepository>,
    pub(crate) tasks: Arc<InMemoryTaskRepository>,
    pub(crate) clock: Arc<FixedClock>,
}

pub(crate) type TestTeamService =
    TeamService<InMemoryTeamRepository, InMemoryUserRepository, InMemoryTaskRepository, FixedClock>;
pub(crate) type TestInvitationService =
    InvitationService<InMemoryTeamRepository, InMemoryUserRepository, FixedClock>;
pub(crate) type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryTeamRepository, FixedClock>;
pub(crate) type TestDashboardService =
    DashboardService<InMemoryTeamRepository, InMemoryTaskRepository, InMemoryUserRepository>;

impl Workspace {
    pub(crate) fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            teams: Arc::new(InMemoryTeamRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            clock: Arc::new(FixedClock::reference()),
        }
    }

    /// Stores an active user whose email is derived from the handle.
    pub(crate) async fn user(&self, handle: &str, first: &str, last: &str) -> eyre::Result<User> {
        let email = format!("{}@example.org", handle.trim_start_matches('@'));
        let profile = UserProfile::parse(handle, first, last, email)?;
        let mut user = User::register(profile, &*self.clock);
        user.activate(&*self.clock);
        self.users.store(&user).await?;
        Ok(user)
    }

    pub(crate) fn team_service(&self, succession: SuccessionPolicy) -> TestTeamService {
        TeamService::new(
            Arc::clone(&self.teams),
            Arc::clone(&self.users),
            Arc::clone(&self.tasks),
            Arc::clone(&self.clock),
            TeamSettings { succession },
        )
    }

    pub(crate) fn invitations(&self) -> TestInvitationService {
        InvitationService::new(
            Arc::clone(&self.teams),
            Arc::clone(&self.users),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn task_service(&self) -> TestTaskService {
        TaskService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.teams),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn dashboard(&self) -> TestDashboardService {
        DashboardService::new(
            Arc::clone(&self.teams),
            Arc::clone(&self.tasks),
            Arc::clone(&self.users),
        )
    }

    /// Creates a team administered by `admin` whose other members have
    /// already accepted their invites.
    pub(crate) async fn team_with_members(
        &self,
        name: &str,
        admin: UserId,
        members: &[UserId],
    ) -> eyre::Result<Team> {
        let team = self
            .team_service(SuccessionPolicy::Random)
            .create_team(CreateTeamRequest::new(name, admin).with_invitees(members.iter().copied()))
            .await?;
        let invitations = self.invitations();
        for member in members {
            invitations.accept(*member, team.id()).await?;
        }
        self.teams
            .find_by_id(team.id())
            .await?
            .ok_or_else(|| eyre::eyre!("team {name} vanished after creation"))
    }
}
