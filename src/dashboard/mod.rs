//! Read-only views over teams, tasks and users.
//!
//! The dashboard never mutates state. It composes the team, task and user
//! repositories into the filtered, sorted lists a web layer renders, and into
//! the choice lists its forms offer.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
