//! Error type for dashboard query parsing.

use thiserror::Error;

/// Errors returned while building dashboard queries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardDomainError {
    /// The sort expression names no sortable column.
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}
