//! User identity for Gecko.
//!
//! Holds user records (handle, names, email and activation state), the
//! sign-up flow that creates inactive accounts, and the activation tokens
//! that switch them on. Authentication itself belongs to an external
//! provider, which only reads [`domain::User::is_active`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
