//! Port contracts for team persistence.

mod repository;

pub use repository::{TeamRepository, TeamRepositoryError, TeamRepositoryResult, TeamWrite};
