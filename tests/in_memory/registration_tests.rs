//! Sign-up and activation through the public registration service.

use super::helpers::{App, app};
use gecko::error::ErrorKind;
use gecko::identity::services::{ActivationOutcome, RegisterUserRequest};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_emails_an_activation_link(app: App) -> eyre::Result<()> {
    let user = app
        .registration
        .register(RegisterUserRequest::new(
            "@johndoe",
            "John",
            "Doe",
            "john@example.org",
        ))
        .await?;

    eyre::ensure!(!user.is_active(), "new accounts start inactive");
    let sent = app.mailer.sent();
    let email = sent
        .first()
        .ok_or_else(|| eyre::eyre!("expected an activation email"))?;
    eyre::ensure!(email.to.as_str() == "john@example.org");
    let link = format!("https://gecko.test/activate/{}/", user.id());
    eyre::ensure!(email.body.contains(&link), "body was {:?}", email.body);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activation_switches_the_account_on_once(app: App) -> eyre::Result<()> {
    let user = app
        .registration
        .register(RegisterUserRequest::new(
            "@janedoe",
            "Jane",
            "Doe",
            "jane@example.org",
        ))
        .await?;
    let token = app.registration.issue_token(&user);

    let first = app.registration.activate(user.id(), token.as_str()).await?;
    let second = app.registration.activate(user.id(), token.as_str()).await?;

    eyre::ensure!(matches!(first, ActivationOutcome::Activated(ref active) if active.is_active()));
    eyre::ensure!(matches!(second, ActivationOutcome::AlreadyActive(_)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn taken_handle_is_a_conflict(app: App) -> eyre::Result<()> {
    app.active_user("@johndoe", "John", "Doe").await?;

    let Err(err) = app
        .registration
        .register(RegisterUserRequest::new(
            "@johndoe",
            "Johnny",
            "Doe",
            "johnny@example.org",
        ))
        .await
    else {
        eyre::bail!("duplicate handle should be refused");
    };
    eyre::ensure!(err.kind() == ErrorKind::Conflict, "got {err:?}");
    Ok(())
}
