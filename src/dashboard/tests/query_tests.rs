//! Filter and ordering tests for task queries.

use crate::dashboard::domain::{DashboardDomainError, SortDirection, SortKey, TaskQuery, TaskSort};
use crate::identity::domain::UserId;
use crate::task::domain::{
    NewTaskData, Task, TaskDescription, TaskPriority, TaskStatus, TaskTitle,
};
use crate::team::domain::TeamId;
use crate::test_support::FixedClock;
use chrono::{NaiveDate, TimeDelta};
use rstest::{fixture, rstest};

struct Sample {
    tasks: Vec<Task>,
    team: TeamId,
    jane: UserId,
}

fn task(
    clock: &FixedClock,
    team_id: TeamId,
    assignee: UserId,
    title: &str,
    due_in_days: i64,
    status: TaskStatus,
    priority: TaskPriority,
) -> Task {
    let data = NewTaskData {
        team_id,
        assignee,
        title: TaskTitle::new(title).unwrap_or_else(|err| panic!("{err}")),
        description: TaskDescription::default(),
        due_date: clock.offset(TimeDelta::days(due_in_days)),
        status,
        priority,
    };
    Task::new(data, clock).unwrap_or_else(|err| panic!("{err}"))
}

#[fixture]
fn sample() -> Sample {
    let clock = FixedClock::reference();
    let team = TeamId::new();
    let other_team = TeamId::new();
    let john = UserId::new();
    let jane = UserId::new();
    let tasks = vec![
        task(&clock, team, john, "Feed geckos", 2, TaskStatus::InProgress, TaskPriority::Low),
        task(&clock, team, jane, "Clean tank", 1, TaskStatus::Completed, TaskPriority::High),
        task(&clock, other_team, jane, "Buy crickets", 3, TaskStatus::Assigned, TaskPriority::Medium),
        task(&clock, team, jane, "Order GECKO food", 1, TaskStatus::Assigned, TaskPriority::Medium),
    ];
    Sample { tasks, team, jane }
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

#[rstest]
fn empty_query_keeps_everything_in_order(sample: Sample) {
    let result = TaskQuery::new().apply(sample.tasks.clone());
    assert_eq!(result, sample.tasks);
}

#[rstest]
fn title_filter_ignores_case(sample: Sample) {
    let result = TaskQuery::new().with_title_containing("gecko").apply(sample.tasks);
    assert_eq!(titles(&result), ["Feed geckos", "Order GECKO food"]);
}

#[rstest]
fn filters_combine(sample: Sample) {
    let result = TaskQuery::new()
        .in_team(sample.team)
        .assigned_to(sample.jane)
        .with_status(TaskStatus::Assigned)
        .apply(sample.tasks);
    assert_eq!(titles(&result), ["Order GECKO food"]);
}

#[rstest]
fn priority_filter(sample: Sample) {
    let result = TaskQuery::new()
        .with_priority(TaskPriority::Medium)
        .apply(sample.tasks);
    assert_eq!(titles(&result), ["Buy crickets", "Order GECKO food"]);
}

#[rstest]
fn due_date_filter_matches_calendar_day(sample: Sample) {
    // The reference clock starts on 2026-03-02.
    let tomorrow = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap_or_default();
    let result = TaskQuery::new().due_on(tomorrow).apply(sample.tasks);
    assert_eq!(titles(&result), ["Clean tank", "Order GECKO food"]);
}

#[rstest]
#[case(SortKey::Title, SortDirection::Ascending, ["Buy crickets", "Clean tank", "Feed geckos", "Order GECKO food"])]
#[case(SortKey::Priority, SortDirection::Descending, ["Clean tank", "Buy crickets", "Order GECKO food", "Feed geckos"])]
#[case(SortKey::Status, SortDirection::Ascending, ["Buy crickets", "Order GECKO food", "Feed geckos", "Clean tank"])]
#[case(SortKey::DueDate, SortDirection::Ascending, ["Clean tank", "Order GECKO food", "Feed geckos", "Buy crickets"])]
fn sorting(
    sample: Sample,
    #[case] key: SortKey,
    #[case] direction: SortDirection,
    #[case] expected: [&str; 4],
) {
    let result = TaskQuery::new().sorted_by(key, direction).apply(sample.tasks);
    assert_eq!(titles(&result), expected);
}

#[rstest]
#[case("due_date", SortKey::DueDate, SortDirection::Ascending)]
#[case("-priority", SortKey::Priority, SortDirection::Descending)]
#[case(" title ", SortKey::Title, SortDirection::Ascending)]
fn sort_expressions_parse(
    #[case] expression: &str,
    #[case] key: SortKey,
    #[case] direction: SortDirection,
) {
    assert_eq!(TaskSort::parse(expression), Ok(TaskSort { key, direction }));
}

#[rstest]
fn unknown_sort_key_is_rejected() {
    assert_eq!(
        TaskSort::parse("-assignee"),
        Err(DashboardDomainError::UnknownSortKey("-assignee".to_owned()))
    );
}
