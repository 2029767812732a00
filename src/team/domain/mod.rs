//! Domain model for teams and their membership state machine.
//!
//! Every mutation goes through the [`Team`] aggregate, which keeps three
//! invariants: the admin is a member, the member set is non-empty, and no
//! user is both invited and a member.

mod error;
mod ids;
mod name;
mod policy;
mod team;

pub use error::TeamDomainError;
pub use ids::TeamId;
pub use name::{TeamDescription, TeamName};
pub use policy::SuccessionPolicy;
pub use team::{InviteOutcome, LeaveOutcome, MembershipState, PersistedTeamData, Team};
