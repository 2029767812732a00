//! Shared wiring for in-memory integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gecko::{
    dashboard::services::DashboardService,
    identity::{
        adapters::memory::InMemoryUserRepository,
        domain::User,
        ports::{ActivationEmail, ActivationMailer, MailerError},
        services::{RegisterUserRequest, RegistrationService},
    },
    settings::{ActivationSettings, TeamSettings},
    task::{adapters::memory::InMemoryTaskRepository, services::TaskService},
    team::{
        adapters::memory::InMemoryTeamRepository,
        domain::{SuccessionPolicy, Team},
        services::{CreateTeamRequest, InvitationService, TeamService},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Registration service wired to the recording mailer.
pub type Registration =
    RegistrationService<InMemoryUserRepository, RecordingMailer, DefaultClock>;
/// Team service over in-memory repositories.
pub type Teams =
    TeamService<InMemoryTeamRepository, InMemoryUserRepository, InMemoryTaskRepository, DefaultClock>;
/// Invitation service over in-memory repositories.
pub type Invitations =
    InvitationService<InMemoryTeamRepository, InMemoryUserRepository, DefaultClock>;
/// Task service over in-memory repositories.
pub type Tasks = TaskService<InMemoryTaskRepository, InMemoryTeamRepository, DefaultClock>;
/// Dashboard service over in-memory repositories.
pub type Dashboard =
    DashboardService<InMemoryTeamRepository, InMemoryTaskRepository, InMemoryUserRepository>;

/// Mailer that keeps every activation email it is handed.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<ActivationEmail>>,
}

impl RecordingMailer {
    /// Returns a copy of the emails sent so far.
    pub fn sent(&self) -> Vec<ActivationEmail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ActivationMailer for RecordingMailer {
    async fn send_activation(&self, email: &ActivationEmail) -> Result<(), MailerError> {
        self.sent
            .lock()
            .map_err(|err| MailerError(err.to_string()))?
            .push(email.clone());
        Ok(())
    }
}

/// One set of shared repositories with every service wired over them.
pub struct App {
    pub mailer: Arc<RecordingMailer>,
    pub registration: Registration,
    pub teams: Teams,
    pub invitations: Invitations,
    pub tasks: Tasks,
    pub dashboard: Dashboard,
}

impl App {
    /// Wires the services with the given succession policy.
    pub fn with_policy(succession: SuccessionPolicy) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let team_repo = Arc::new(InMemoryTeamRepository::new());
        let task_repo = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        let mailer = Arc::new(RecordingMailer::default());
        let activation = ActivationSettings {
            secret: "integration-secret".to_owned(),
            token_ttl_secs: 3_600,
            site_domain: "gecko.test".to_owned(),
        };

        Self {
            registration: RegistrationService::new(
                Arc::clone(&users),
                Arc::clone(&mailer),
                Arc::clone(&clock),
                &activation,
            ),
            teams: TeamService::new(
                Arc::clone(&team_repo),
                Arc::clone(&users),
                Arc::clone(&task_repo),
                Arc::clone(&clock),
                TeamSettings { succession },
            ),
            invitations: InvitationService::new(
                Arc::clone(&team_repo),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            tasks: TaskService::new(
                Arc::clone(&task_repo),
                Arc::clone(&team_repo),
                Arc::clone(&clock),
            ),
            dashboard: DashboardService::new(team_repo, task_repo, users),
            mailer,
        }
    }

    /// Registers a user and activates the account.
    pub async fn active_user(&self, handle: &str, first: &str, last: &str) -> eyre::Result<User> {
        let email = format!("{}@example.org", handle.trim_start_matches('@'));
        let user = self
            .registration
            .register(RegisterUserRequest::new(handle, first, last, email))
            .await?;
        let token = self.registration.issue_token(&user);
        self.registration.activate(user.id(), token.as_str()).await?;
        Ok(self.registration.find_user(user.id()).await?)
    }

    /// Creates a team whose invitees have all accepted.
    pub async fn team_with(&self, name: &str, admin: &User, others: &[&User]) -> eyre::Result<Team> {
        let team = self
            .teams
            .create_team(
                CreateTeamRequest::new(name, admin.id())
                    .with_invitees(others.iter().map(|user| user.id())),
            )
            .await?;
        for user in others {
            self.invitations.accept(user.id(), team.id()).await?;
        }
        Ok(self.teams.find_team(team.id()).await?)
    }
}

/// Services wired with the default random succession policy.
#[fixture]
pub fn app() -> App {
    App::with_policy(SuccessionPolicy::Random)
}
