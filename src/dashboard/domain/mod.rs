//! Query types for dashboard task listings.

mod error;
mod query;

pub use error::DashboardDomainError;
pub use query::{SortDirection, SortKey, TaskQuery, TaskSort};
