//! Team membership workflows across the team, invitation and dashboard
//! services.

use super::helpers::{App, app};
use gecko::error::ErrorKind;
use gecko::task::services::CreateTaskRequest;
use gecko::team::domain::{InviteOutcome, LeaveOutcome, MembershipState, SuccessionPolicy};
use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invite_accept_and_reject_shape_membership(app: App) -> eyre::Result<()> {
    let john = app.active_user("@johndoe", "John", "Doe").await?;
    let jane = app.active_user("@janedoe", "Jane", "Doe").await?;
    let petra = app.active_user("@petra", "Petra", "Pickles").await?;
    let team = app.team_with("Gecko", &john, &[]).await?;

    for user in [&jane, &petra] {
        let outcome = app.invitations.invite(team.id(), john.id(), user.id()).await?;
        eyre::ensure!(outcome == InviteOutcome::Invited);
    }
    let pending = app.invitations.pending_invites(jane.id()).await?;
    eyre::ensure!(pending.iter().any(|invited| invited.id() == team.id()));

    eyre::ensure!(app.invitations.accept(jane.id(), team.id()).await?);
    eyre::ensure!(app.invitations.reject(petra.id(), team.id()).await?);

    let stored = app.teams.find_team(team.id()).await?;
    eyre::ensure!(stored.membership_state(jane.id()) == MembershipState::Member);
    eyre::ensure!(stored.membership_state(petra.id()) == MembershipState::Unrelated);
    eyre::ensure!(app.invitations.pending_invites(jane.id()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_admin_invites(app: App) -> eyre::Result<()> {
    let john = app.active_user("@johndoe", "John", "Doe").await?;
    let jane = app.active_user("@janedoe", "Jane", "Doe").await?;
    let petra = app.active_user("@petra", "Petra", "Pickles").await?;
    let team = app.team_with("Gecko", &john, &[&jane]).await?;

    let Err(err) = app.invitations.invite(team.id(), jane.id(), petra.id()).await else {
        eyre::bail!("a plain member must not invite");
    };
    eyre::ensure!(err.kind() == ErrorKind::PermissionDenied, "got {err:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn departing_admin_hands_over_to_the_remaining_member(app: App) -> eyre::Result<()> {
    let john = app.active_user("@johndoe", "John", "Doe").await?;
    let jane = app.active_user("@janedoe", "Jane", "Doe").await?;
    let team = app.team_with("Gecko", &john, &[&jane]).await?;

    let outcome = app.teams.leave_team(team.id(), john.id(), None).await?;

    eyre::ensure!(outcome == LeaveOutcome::AdminHandedOver { new_admin: jane.id() });
    let stored = app.teams.find_team(team.id()).await?;
    eyre::ensure!(stored.admin() == jane.id());
    eyre::ensure!(!stored.is_member(john.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn explicit_policy_requires_a_named_successor() -> eyre::Result<()> {
    let app = App::with_policy(SuccessionPolicy::Explicit);
    let john = app.active_user("@johndoe", "John", "Doe").await?;
    let jane = app.active_user("@janedoe", "Jane", "Doe").await?;
    let team = app.team_with("Gecko", &john, &[&jane]).await?;

    let Err(err) = app.teams.leave_team(team.id(), john.id(), None).await else {
        eyre::bail!("leaving without a successor should fail");
    };
    eyre::ensure!(err.kind() == ErrorKind::Validation, "got {err:?}");
    eyre::ensure!(app.teams.find_team(team.id()).await?.admin() == john.id());

    let outcome = app.teams.leave_team(team.id(), john.id(), Some(jane.id())).await?;
    eyre::ensure!(outcome == LeaveOutcome::AdminHandedOver { new_admin: jane.id() });
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn last_member_leaving_disbands_team_and_tasks(app: App) -> eyre::Result<()> {
    let john = app.active_user("@johndoe", "John", "Doe").await?;
    let team = app.team_with("Gecko", &john, &[]).await?;
    let due = DefaultClock.utc() + TimeDelta::days(1);
    let task = app
        .tasks
        .create_task(CreateTaskRequest::new(john.id(), team.id(), john.id(), "Feed", due))
        .await?;

    let outcome = app.teams.leave_team(team.id(), john.id(), None).await?;

    eyre::ensure!(outcome == LeaveOutcome::Disbanded);
    let team_err = app
        .teams
        .find_team(team.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("team should be gone"))?;
    eyre::ensure!(team_err.kind() == ErrorKind::NotFound);
    let task_err = app
        .tasks
        .find_task(task.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("task should be gone"))?;
    eyre::ensure!(task_err.kind() == ErrorKind::NotFound);
    eyre::ensure!(app.dashboard.teams_for_user(john.id()).await?.is_empty());
    Ok(())
}
