//! Error types for task domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or changing tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The title exceeds the storage limit.
    #[error("task title exceeds 50 character limit: {0}")]
    TitleTooLong(String),

    /// The description exceeds the storage limit.
    #[error("task description exceeds 400 character limit")]
    DescriptionTooLong,

    /// A newly chosen due date lies before the current instant.
    #[error("due date {due} cannot be in the past (now {now})")]
    DueDateInPast {
        /// Requested due date.
        due: DateTime<Utc>,
        /// Instant the check ran at.
        now: DateTime<Utc>,
    },

    /// A quick update named a field that cannot be changed that way.
    #[error("unknown task field: {0}")]
    UnknownField(String),

    /// A quick update carried a value the field cannot hold.
    #[error("invalid value '{value}' for task field {field}")]
    InvalidFieldValue {
        /// Canonical field name.
        field: &'static str,
        /// Raw value as supplied.
        value: String,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
