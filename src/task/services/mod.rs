//! Application services for team tasks.

mod assignment;

pub use assignment::{
    CreateTaskRequest, EditTaskRequest, TaskService, TaskServiceError, TaskServiceResult,
};
