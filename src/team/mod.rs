//! Team administration, membership and invitations for Gecko.
//!
//! A team has exactly one admin, a non-empty member set and a set of pending
//! invites. New members always opt in: admins issue invites, and only the
//! invited user can turn an invite into membership. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
