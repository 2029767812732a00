//! Single-field task updates parsed from caller-supplied strings.

use super::{TaskDomainError, TaskPriority, TaskStatus};
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Fields that may be changed through a quick update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// `status`
    Status,
    /// `priority`
    Priority,
    /// `assignee`
    Assignee,
    /// `due_date`
    DueDate,
}

impl TaskField {
    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
            Self::DueDate => "due_date",
        }
    }
}

impl TryFrom<&str> for TaskField {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "assignee" => Ok(Self::Assignee),
            "due_date" => Ok(Self::DueDate),
            _ => Err(TaskDomainError::UnknownField(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed single-field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFieldUpdate {
    /// New status.
    Status(TaskStatus),
    /// New priority.
    Priority(TaskPriority),
    /// New assignee; membership is checked by the service.
    Assignee(UserId),
    /// New due date; must not be in the past.
    DueDate(DateTime<Utc>),
}

impl TaskFieldUpdate {
    /// Parses a field name and raw value.
    ///
    /// Due dates accept RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` read as UTC, or a
    /// bare `YYYY-MM-DD` meaning midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownField`] for unrecognized field names
    /// and [`TaskDomainError::InvalidFieldValue`] for unparseable values.
    pub fn parse(field: &str, value: &str) -> Result<Self, TaskDomainError> {
        let parsed_field = TaskField::try_from(field)?;
        let invalid = || TaskDomainError::InvalidFieldValue {
            field: parsed_field.as_str(),
            value: value.to_owned(),
        };
        match parsed_field {
            TaskField::Status => TaskStatus::try_from(value)
                .map(Self::Status)
                .map_err(|_| invalid()),
            TaskField::Priority => TaskPriority::try_from(value)
                .map(Self::Priority)
                .map_err(|_| invalid()),
            TaskField::Assignee => Uuid::parse_str(value.trim())
                .map(|uuid| Self::Assignee(UserId::from_uuid(uuid)))
                .map_err(|_| invalid()),
            TaskField::DueDate => parse_due_date(value)
                .map(Self::DueDate)
                .ok_or_else(invalid),
        }
    }

    /// Returns the field this update changes.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::Status(_) => TaskField::Status,
            Self::Priority(_) => TaskField::Priority,
            Self::Assignee(_) => TaskField::Assignee,
            Self::DueDate(_) => TaskField::DueDate,
        }
    }
}

fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
