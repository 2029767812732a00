//! Task filters and ordering.

use super::DashboardDomainError;
use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskPriority, TaskStatus};
use crate::team::domain::TeamId;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Column a task listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Alphabetical by title.
    Title,
    /// Pipeline order: assigned, in progress, completed.
    Status,
    /// Chronological by due date.
    DueDate,
    /// By rank: low, medium, high.
    Priority,
}

impl SortKey {
    fn compare(self, left: &Task, right: &Task) -> Ordering {
        match self {
            Self::Title => left.title().cmp(right.title()),
            Self::Status => left.status().cmp(&right.status()),
            Self::DueDate => left.due_date().cmp(&right.due_date()),
            Self::Priority => left.priority().cmp(&right.priority()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Ordering for a task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskSort {
    /// Column to order by.
    pub key: SortKey,
    /// Direction to order in.
    pub direction: SortDirection,
}

impl TaskSort {
    /// Parses a sort expression such as `due_date` or `-priority`. A leading
    /// `-` sorts descending.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDomainError::UnknownSortKey`] when the column is
    /// not sortable.
    pub fn parse(expression: &str) -> Result<Self, DashboardDomainError> {
        let trimmed = expression.trim();
        let (direction, column) = trimmed
            .strip_prefix('-')
            .map_or((SortDirection::Ascending, trimmed), |descending| {
                (SortDirection::Descending, descending)
            });
        let key = match column {
            "title" => SortKey::Title,
            "status" => SortKey::Status,
            "due_date" => SortKey::DueDate,
            "priority" => SortKey::Priority,
            _ => return Err(DashboardDomainError::UnknownSortKey(expression.to_owned())),
        };
        Ok(Self { key, direction })
    }

    fn compare(self, left: &Task, right: &Task) -> Ordering {
        let ordering = self.key.compare(left, right);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Filters and ordering for a task listing. Unset filters match every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    title_contains: Option<String>,
    status: Option<TaskStatus>,
    due_on: Option<NaiveDate>,
    team: Option<TeamId>,
    priority: Option<TaskPriority>,
    assignee: Option<UserId>,
    sort: Option<TaskSort>,
}

impl TaskQuery {
    /// Creates a query that matches every task in storage order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps tasks whose title contains the text, ignoring case.
    #[must_use]
    pub fn with_title_containing(mut self, text: impl Into<String>) -> Self {
        self.title_contains = Some(text.into().to_lowercase());
        self
    }

    /// Keeps tasks with the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps tasks due on the given calendar day (UTC).
    #[must_use]
    pub const fn due_on(mut self, day: NaiveDate) -> Self {
        self.due_on = Some(day);
        self
    }

    /// Keeps tasks owned by the given team.
    #[must_use]
    pub const fn in_team(mut self, team: TeamId) -> Self {
        self.team = Some(team);
        self
    }

    /// Keeps tasks with the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Keeps tasks assigned to the given user.
    #[must_use]
    pub const fn assigned_to(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Orders the results.
    #[must_use]
    pub const fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(TaskSort { key, direction });
        self
    }

    /// Orders the results by a parsed sort expression.
    #[must_use]
    pub const fn with_sort(mut self, sort: TaskSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Returns whether the task passes every filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.title_contains
            .as_deref()
            .is_none_or(|needle| task.title().as_str().to_lowercase().contains(needle))
            && self.status.is_none_or(|status| task.status() == status)
            && self
                .due_on
                .is_none_or(|day| task.due_date().date_naive() == day)
            && self.team.is_none_or(|team| task.team_id() == team)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.assignee.is_none_or(|assignee| task.assignee() == assignee)
    }

    /// Filters the tasks, then orders them. Ties keep their input order.
    #[must_use]
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        let mut selected: Vec<Task> = tasks.into_iter().filter(|task| self.matches(task)).collect();
        if let Some(sort) = self.sort {
            selected.sort_by(|left, right| sort.compare(left, right));
        }
        selected
    }
}
