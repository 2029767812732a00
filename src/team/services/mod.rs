//! Application services for team management and invitations.

mod error;
mod invitation;
mod membership;

pub use error::{TeamServiceError, TeamServiceResult};
pub use invitation::InvitationService;
pub use membership::{CreateTeamRequest, TeamService};
