//! Gecko: team membership and task assignment core.
//!
//! This crate holds the state machine behind a small multi-tenant task and
//! team manager: who belongs to a team, who administers it, how invitations
//! are accepted or rejected, and how tasks relate to teams and assignees.
//! The web layer calls into the services exposed here, passing the acting
//! user explicitly on every call.
//!
//! # Architecture
//!
//! Gecko follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//! - **Services**: Orchestration of domain operations over ports
//!
//! # Modules
//!
//! - [`identity`]: User records, sign-up and account activation
//! - [`team`]: Team administration, membership and invitations
//! - [`task`]: Task creation, assignment and updates within a team
//! - [`dashboard`]: Read-only filtered views over teams and tasks
//! - [`settings`]: Layered runtime configuration

pub mod dashboard;
pub mod error;
pub mod identity;
pub mod persistence;
pub mod settings;
pub mod task;
pub mod team;

#[cfg(test)]
pub(crate) mod test_support;
