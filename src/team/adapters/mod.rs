//! Adapter implementations for team ports.

pub mod memory;
pub mod postgres;
