//! Service layer for sign-up, activation and profile maintenance.

use crate::error::ErrorKind;
use crate::identity::{
    domain::{
        ActivationToken, ActivationTokenSigner, EmailAddress, IdentityDomainError, User, UserId,
        UserProfile, Username,
    },
    ports::{ActivationEmail, ActivationMailer, MailerError, UserRepository, UserRepositoryError},
};
use crate::settings::ActivationSettings;
use minijinja::{Environment, context};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

const ACTIVATION_SUBJECT: &str = "Activate your account.";

const ACTIVATION_TEMPLATE: &str = "\
Hi {{ first_name }},

Please click on the link below to confirm your registration as {{ username }}:

https://{{ domain }}/activate/{{ uid }}/{{ token }}/
";

/// Request payload for signing up a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
}

impl RegisterUserRequest {
    /// Creates a sign-up request from raw form input.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// Request payload for replacing a user's profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
}

impl UpdateProfileRequest {
    /// Creates a profile update request from raw form input.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// Result of presenting an activation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The account was inactive and is now active.
    Activated(User),
    /// The account had already been activated; nothing changed.
    AlreadyActive(User),
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// The activation email could not be delivered.
    #[error(transparent)]
    Mailer(#[from] MailerError),
    /// The activation email template failed to render.
    #[error("activation email rendering failed: {0}")]
    TemplateRender(String),
    /// No user has the given identifier.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// No user has the given email address.
    #[error("no account registered for {0}")]
    EmailNotFound(EmailAddress),
    /// The account is already active, so no activation email is sent.
    #[error("account {0} is already active")]
    AlreadyActive(UserId),
}

impl IdentityServiceError {
    /// Classifies the error for the calling layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::AlreadyActive(_) => ErrorKind::Validation,
            Self::Repository(
                UserRepositoryError::DuplicateUser(_)
                | UserRepositoryError::DuplicateUsername(_)
                | UserRepositoryError::DuplicateEmail(_),
            ) => ErrorKind::Conflict,
            Self::Repository(UserRepositoryError::NotFound(_))
            | Self::UserNotFound(_)
            | Self::EmailNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Mailer(_) | Self::TemplateRender(_) => {
                ErrorKind::Persistence
            }
        }
    }
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;

/// Sign-up, activation and profile orchestration service.
#[derive(Clone)]
pub struct RegistrationService<R, M, C>
where
    R: UserRepository,
    M: ActivationMailer,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    mailer: Arc<M>,
    clock: Arc<C>,
    signer: ActivationTokenSigner,
    site_domain: String,
}

impl<R, M, C> RegistrationService<R, M, C>
where
    R: UserRepository,
    M: ActivationMailer,
    C: Clock + Send + Sync,
{
    /// Creates a new registration service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        mailer: Arc<M>,
        clock: Arc<C>,
        settings: &ActivationSettings,
    ) -> Self {
        Self {
            repository,
            mailer,
            clock,
            signer: ActivationTokenSigner::new(settings.secret.clone(), settings.token_ttl()),
            site_domain: settings.site_domain.clone(),
        }
    }

    /// Signs up a new, inactive user and emails an activation link.
    ///
    /// The account is stored before the email is sent; when delivery fails
    /// the caller may retry with [`Self::resend_activation`].
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError`] when validation fails, the handle or
    /// email is taken, or the email cannot be rendered or delivered.
    pub async fn register(&self, request: RegisterUserRequest) -> IdentityServiceResult<User> {
        let RegisterUserRequest {
            username,
            first_name,
            last_name,
            email,
        } = request;
        let profile = UserProfile::parse(username, first_name, last_name, email)?;
        let user = User::register(profile, &*self.clock);

        let message = self.compose_activation_email(&user)?;
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), username = %user.username(), "user registered");

        self.mailer.send_activation(&message).await?;
        Ok(user)
    }

    /// Activates an account with a token from its activation email.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::UserNotFound`] for an unknown user or
    /// [`IdentityDomainError::InvalidActivationToken`] when the token does not
    /// verify.
    pub async fn activate(
        &self,
        user_id: UserId,
        token: &str,
    ) -> IdentityServiceResult<ActivationOutcome> {
        let mut user = self.find_by_id_or_error(user_id).await?;
        if user.is_active() {
            debug!(%user_id, "activation requested for active account");
            return Ok(ActivationOutcome::AlreadyActive(user));
        }

        self.signer.verify(&user, token, &*self.clock)?;
        user.activate(&*self.clock);
        self.repository.update(&user).await?;
        info!(%user_id, "user activated");
        Ok(ActivationOutcome::Activated(user))
    }

    /// Issues a fresh activation token and emails it again.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::EmailNotFound`] when nobody registered
    /// with the address, [`IdentityServiceError::AlreadyActive`] when the
    /// account needs no activation, or a mailer error on delivery failure.
    pub async fn resend_activation(&self, email: &str) -> IdentityServiceResult<()> {
        let address = EmailAddress::new(email)?;
        let user = self
            .repository
            .find_by_email(&address)
            .await?
            .ok_or_else(|| IdentityServiceError::EmailNotFound(address.clone()))?;
        if user.is_active() {
            return Err(IdentityServiceError::AlreadyActive(user.id()));
        }

        let message = self.compose_activation_email(&user)?;
        self.mailer.send_activation(&message).await?;
        debug!(user_id = %user.id(), "activation email re-sent");
        Ok(())
    }

    /// Replaces a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError`] when validation fails, the user is
    /// unknown, or the new handle or email belongs to someone else.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> IdentityServiceResult<User> {
        let UpdateProfileRequest {
            username,
            first_name,
            last_name,
            email,
        } = request;
        let profile = UserProfile::parse(username, first_name, last_name, email)?;

        let mut user = self.find_by_id_or_error(user_id).await?;
        user.update_profile(profile, &*self.clock);
        self.repository.update(&user).await?;
        Ok(user)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::UserNotFound`] when the user does not
    /// exist.
    pub async fn find_user(&self, user_id: UserId) -> IdentityServiceResult<User> {
        self.find_by_id_or_error(user_id).await
    }

    /// Finds a user by handle.
    ///
    /// Returns `Ok(None)` when no user has the handle.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] for a malformed handle, or
    /// [`IdentityServiceError::Repository`] when lookup fails.
    pub async fn find_by_username(&self, username: &str) -> IdentityServiceResult<Option<User>> {
        let handle = Username::new(username)?;
        Ok(self.repository.find_by_username(&handle).await?)
    }

    /// Issues an activation token for the user's current state.
    #[must_use]
    pub fn issue_token(&self, user: &User) -> ActivationToken {
        self.signer.issue(user, &*self.clock)
    }

    fn compose_activation_email(&self, user: &User) -> IdentityServiceResult<ActivationEmail> {
        let token = self.issue_token(user);
        let body = Environment::new()
            .render_str(
                ACTIVATION_TEMPLATE,
                context! {
                    first_name => user.first_name().as_str(),
                    username => user.username().as_str(),
                    domain => self.site_domain.as_str(),
                    uid => user.id().to_string(),
                    token => token.as_str(),
                },
            )
            .map_err(|err| IdentityServiceError::TemplateRender(err.to_string()))?;

        Ok(ActivationEmail {
            to: user.email().clone(),
            subject: ACTIVATION_SUBJECT.to_owned(),
            body,
        })
    }

    async fn find_by_id_or_error(&self, user_id: UserId) -> IdentityServiceResult<User> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound(user_id))
    }
}
