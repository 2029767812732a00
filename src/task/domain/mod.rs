//! Domain model for team tasks.
//!
//! Field validation lives in the value types; the [`Task`] aggregate owns the
//! due-date rule, which applies to newly chosen dates only.

mod error;
mod ids;
mod status;
mod task;
mod text;
mod update;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTaskData, PersistedTaskData, Task, TaskEdit};
pub use text::{TaskDescription, TaskTitle};
pub use update::{TaskField, TaskFieldUpdate};
