//! Task assignment within teams.
//!
//! Tasks belong to exactly one team and are assigned to one of its members.
//! The module follows the same hexagonal layout as the rest of the crate:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
