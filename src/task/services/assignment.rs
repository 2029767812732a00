//! Service layer for creating, editing and deleting team tasks.
//!
//! Every operation requires the acting user to be a member of the owning
//! team, and every assignee must be a member of that team as well.

use crate::error::ErrorKind;
use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        NewTaskData, Task, TaskDescription, TaskDomainError, TaskEdit, TaskFieldUpdate, TaskId,
        TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::team::{
    domain::{Team, TeamId},
    ports::{TeamRepository, TeamRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    requester: UserId,
    team_id: TeamId,
    assignee: UserId,
    title: String,
    description: String,
    due_date: DateTime<Utc>,
    status: TaskStatus,
    priority: TaskPriority,
}

impl CreateTaskRequest {
    /// Creates a request with default status (`assigned`), priority
    /// (`medium`) and an empty description.
    #[must_use]
    pub fn new(
        requester: UserId,
        team_id: TeamId,
        assignee: UserId,
        title: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            requester,
            team_id,
            assignee,
            title: title.into(),
            description: String::new(),
            due_date,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Request payload for a full-field task edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    task_id: TaskId,
    requester: UserId,
    assignee: UserId,
    title: String,
    description: String,
    due_date: DateTime<Utc>,
    status: TaskStatus,
    priority: TaskPriority,
}

impl EditTaskRequest {
    /// Starts an edit pre-filled with the task's current values.
    #[must_use]
    pub fn from_task(task: &Task, requester: UserId) -> Self {
        Self {
            task_id: task.id(),
            requester,
            assignee: task.assignee(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            due_date: task.due_date(),
            status: task.status(),
            priority: task.priority(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = assignee;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Field validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Team lookup failed.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),
    /// No task has the given identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// No team has the given identifier.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),
    /// The acting user does not belong to the owning team.
    #[error("user {user_id} is not a member of team {team_id}")]
    NotATeamMember {
        /// Owning team.
        team_id: TeamId,
        /// Acting user.
        user_id: UserId,
    },
    /// The assignee does not belong to the owning team.
    #[error("assignee {user_id} is not a member of team {team_id}")]
    InvalidAssignee {
        /// Owning team.
        team_id: TeamId,
        /// Rejected assignee.
        user_id: UserId,
    },
}

impl TaskServiceError {
    /// Classifies the error for the calling layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotATeamMember { .. } => ErrorKind::PermissionDenied,
            Self::InvalidAssignee { .. } => ErrorKind::InvalidMember,
            Self::Repository(TaskRepositoryError::DuplicateTask(_)) => ErrorKind::Conflict,
            Self::Repository(TaskRepositoryError::NotFound(_))
            | Self::Teams(TeamRepositoryError::NotFound(_))
            | Self::TaskNotFound(_)
            | Self::TeamNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Teams(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<K, T, C>
where
    K: TaskRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<K>,
    teams: Arc<T>,
    clock: Arc<C>,
}

impl<K, T, C> TaskService<K, T, C>
where
    K: TaskRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<K>, teams: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            teams,
            clock,
        }
    }

    /// Creates a task in the requester's team.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the team does not exist, the
    /// requester or assignee is not a member, a field is invalid, or the due
    /// date lies in the past.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            requester,
            team_id,
            assignee,
            title,
            description,
            due_date,
            status,
            priority,
        } = request;
        let team = self.team_for(team_id, requester).await?;
        let task_title = TaskTitle::new(title)?;
        let task_description = TaskDescription::new(description)?;
        ensure_assignee(&team, assignee)?;

        let task = Task::new(
            NewTaskData {
                team_id,
                assignee,
                title: task_title,
                description: task_description,
                due_date,
                status,
                priority,
            },
            &*self.clock,
        )?;
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), team_id = %team_id, assignee = %assignee, "task created");
        Ok(task)
    }

    /// Replaces every editable field of a task. A past due date is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task does not exist, the
    /// requester is not a member, a field is invalid, or a newly chosen
    /// assignee is not a member.
    pub async fn edit_task(&self, request: EditTaskRequest) -> TaskServiceResult<Task> {
        let EditTaskRequest {
            task_id,
            requester,
            assignee,
            title,
            description,
            due_date,
            status,
            priority,
        } = request;
        let mut task = self.load_task(task_id).await?;
        let team = self.team_for(task.team_id(), requester).await?;
        let task_title = TaskTitle::new(title)?;
        let task_description = TaskDescription::new(description)?;
        if assignee != task.assignee() {
            ensure_assignee(&team, assignee)?;
        }

        task.apply_edit(
            TaskEdit {
                assignee,
                title: task_title,
                description: task_description,
                due_date,
                status,
                priority,
            },
            &*self.clock,
        );
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, "task edited");
        Ok(task)
    }

    /// Changes one field named by string, with the value given as a string.
    ///
    /// Accepted fields are `status`, `priority`, `assignee` and `due_date`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task does not exist, the
    /// requester is not a member, the field is unknown, the value cannot be
    /// parsed, the new assignee is not a member, or a new due date lies in
    /// the past.
    pub async fn quick_update(
        &self,
        task_id: TaskId,
        requester: UserId,
        field: &str,
        value: &str,
    ) -> TaskServiceResult<Task> {
        let mut task = self.load_task(task_id).await?;
        let team = self.team_for(task.team_id(), requester).await?;
        let update = TaskFieldUpdate::parse(field, value)?;
        match update {
            TaskFieldUpdate::Assignee(assignee) if assignee != task.assignee() => {
                ensure_assignee(&team, assignee)?;
            }
            _ => {}
        }

        task.apply_update(update, &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, field = %update.field(), "task field updated");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task does not exist or the
    /// requester is not a member of its team.
    pub async fn delete_task(&self, task_id: TaskId, requester: UserId) -> TaskServiceResult<()> {
        let task = self.load_task(task_id).await?;
        self.team_for(task.team_id(), requester).await?;
        self.tasks.delete(task_id).await?;
        info!(task_id = %task_id, team_id = %task.team_id(), "task deleted");
        Ok(())
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when no task matches.
    pub async fn find_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.load_task(task_id).await
    }

    async fn load_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    /// Loads the team and checks that the requester belongs to it.
    async fn team_for(&self, team_id: TeamId, requester: UserId) -> TaskServiceResult<Team> {
        let team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or(TaskServiceError::TeamNotFound(team_id))?;
        if !team.is_member(requester) {
            return Err(TaskServiceError::NotATeamMember {
                team_id,
                user_id: requester,
            });
        }
        Ok(team)
    }
}

fn ensure_assignee(team: &Team, assignee: UserId) -> TaskServiceResult<()> {
    if team.is_member(assignee) {
        Ok(())
    } else {
        Err(TaskServiceError::InvalidAssignee {
            team_id: team.id(),
            user_id: assignee,
        })
    }
}
