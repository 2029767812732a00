//! Task assignment, quick updates and dashboard views over shared
//! in-memory stores.

use super::helpers::{App, app};
use chrono::TimeDelta;
use gecko::dashboard::{
    domain::{SortDirection, SortKey, TaskQuery},
    services::AssigneeScope,
};
use gecko::error::ErrorKind;
use gecko::task::{
    domain::{TaskPriority, TaskStatus},
    services::{CreateTaskRequest, EditTaskRequest},
};
use mockable::{Clock, DefaultClock};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_assigns_edits_and_quick_updates_a_task(app: App) -> eyre::Result<()> {
    let john = app.active_user("@johndoe", "John", "Doe").await?;
    let jane = app.active_user("@janedoe", "Jane", "Doe").await?;
    let team = app.team_with("Gecko", &john, &[&jane]).await?;
    let due = DefaultClock.utc() + TimeDelta::days(2);

    let created = app
        .tasks
        .create_task(
            CreateTaskRequest::new(jane.id(), team.id(), john.id(), "Feed the geckos", due)
                .with_priority(TaskPriority::High),
        )
        .await?;
    let edited = app
        .tasks
        .edit_task(EditTaskRequest::from_task(&created, jane.id()).with_assignee(jane.id()))
        .await?;
    let updated = app
        .tasks
        .quick_update(edited.id(), john.id(), "status", "completed")
        .await?;

    eyre::ensure!(edited.assignee() == jane.id());
    eyre::ensure!(updated.status() == TaskStatus::Completed);
    eyre::ensure!(updated.priority() == TaskPriority::High);
    eyre::ensure!(app.tasks.find_task(created.id()).await? == updated);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_cannot_touch_team_tasks(app: App) -> eyre::Result<()> {
    let john = app.active_user("@johndoe", "John", "Doe").await?;
    let petra = app.active_user("@petra", "Petra", "Pickles").await?;
    let team = app.team_with("Gecko", &john, &[]).await?;
    let due = DefaultClock.utc() + TimeDelta::days(1);
    let task = app
        .tasks
        .create_task(CreateTaskRequest::new(john.id(), team.id(), john.id(), "Feed", due))
        .await?;

    let Err(assign_err) = app
        .tasks
        .create_task(CreateTaskRequest::new(john.id(), team.id(), petra.id(), "Clean", due))
        .await
    else {
        eyre::bail!("assigning an outsider should fail");
    };
    let Err(update_err) = app
        .tasks
        .quick_update(task.id(), petra.id(), "status", "completed")
        .await
    else {
        eyre::bail!("outsider update should fail");
    };

    eyre::ensure!(assign_err.kind() == ErrorKind::InvalidMember, "got {assign_err:?}");
    eyre::ensure!(update_err.kind() == ErrorKind::PermissionDenied, "got {update_err:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_reflects_membership_across_teams(app: App) -> eyre::Result<()> {
    let john = app.active_user("@johndoe", "John", "Doe").await?;
    let jane = app.active_user("@janedoe", "Jane", "Doe").await?;
    let alice = app.active_user("@alice", "Alice", "Adams").await?;
    let gecko = app.team_with("Gecko", &john, &[&jane]).await?;
    let anole = app.team_with("Anole", &jane, &[]).await?;
    let now = DefaultClock.utc();
    for (team, title, priority) in [
        (gecko.id(), "Feed", TaskPriority::Low),
        (anole.id(), "Mist", TaskPriority::High),
        (gecko.id(), "Clean", TaskPriority::Medium),
    ] {
        app.tasks
            .create_task(
                CreateTaskRequest::new(jane.id(), team, jane.id(), title, now + TimeDelta::days(1))
                    .with_priority(priority),
            )
            .await?;
    }

    let janes = app
        .dashboard
        .tasks_for_user(
            jane.id(),
            &TaskQuery::new().sorted_by(SortKey::Priority, SortDirection::Descending),
        )
        .await?;
    let titles: Vec<&str> = janes.iter().map(|task| task.title().as_str()).collect();
    eyre::ensure!(titles == ["Mist", "Clean", "Feed"], "got {titles:?}");

    let choices = app
        .dashboard
        .assignee_choices(AssigneeScope::UserTeams(jane.id()))
        .await?;
    eyre::ensure!(choices.iter().all(|user| user.id() != alice.id()));
    eyre::ensure!(choices.len() == 2);

    let candidates = app.dashboard.invite_candidates(gecko.id()).await?;
    eyre::ensure!(candidates.iter().map(|user| user.id()).eq([alice.id()]));
    Ok(())
}
