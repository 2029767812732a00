//! In-memory team adapters.

mod team;

pub use team::InMemoryTeamRepository;
