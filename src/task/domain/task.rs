//! Task aggregate root.

use super::{
    TaskDescription, TaskDomainError, TaskFieldUpdate, TaskId, TaskPriority, TaskStatus,
    TaskTitle,
};
use crate::identity::domain::UserId;
use crate::team::domain::TeamId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    team_id: TeamId,
    assignee: UserId,
    title: TaskTitle,
    description: TaskDescription,
    due_date: DateTime<Utc>,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning team.
    pub team_id: TeamId,
    /// Assigned member.
    pub assignee: UserId,
    /// Task title.
    pub title: TaskTitle,
    /// Task description.
    pub description: TaskDescription,
    /// Due date; must not be in the past.
    pub due_date: DateTime<Utc>,
    /// Initial status.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
}

/// Replacement values for a full edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    /// Assigned member.
    pub assignee: UserId,
    /// Task title.
    pub title: TaskTitle,
    /// Task description.
    pub description: TaskDescription,
    /// Due date; may lie in the past.
    pub due_date: DateTime<Utc>,
    /// Status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted owning team.
    pub team_id: TeamId,
    /// Persisted assignee.
    pub assignee: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when the due date is
    /// strictly before the clock's current instant.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let now = clock.utc();
        ensure_not_past(data.due_date, now)?;
        Ok(Self {
            id: TaskId::new(),
            team_id: data.team_id,
            assignee: data.assignee,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            priority: data.priority,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            team_id: data.team_id,
            assignee: data.assignee,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the assigned member.
    #[must_use]
    pub const fn assignee(&self) -> UserId {
        self.assignee
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces every editable field. Existing tasks may keep or receive a
    /// past due date here.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) {
        let TaskEdit {
            assignee,
            title,
            description,
            due_date,
            status,
            priority,
        } = edit;
        self.assignee = assignee;
        self.title = title;
        self.description = description;
        self.due_date = due_date;
        self.status = status;
        self.priority = priority;
        self.touch(clock);
    }

    /// Applies a single-field change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when a new due date lies
    /// before the current instant; the task is unchanged.
    pub fn apply_update(
        &mut self,
        update: TaskFieldUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        match update {
            TaskFieldUpdate::Status(status) => self.status = status,
            TaskFieldUpdate::Priority(priority) => self.priority = priority,
            TaskFieldUpdate::Assignee(assignee) => self.assignee = assignee,
            TaskFieldUpdate::DueDate(due_date) => {
                ensure_not_past(due_date, clock.utc())?;
                self.due_date = due_date;
            }
        }
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn ensure_not_past(due: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), TaskDomainError> {
    if due < now {
        return Err(TaskDomainError::DueDateInPast { due, now });
    }
    Ok(())
}
