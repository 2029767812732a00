//! `PostgreSQL` adapters for team persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTeamRepository;
