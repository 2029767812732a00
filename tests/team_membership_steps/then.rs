//! Then steps for team membership BDD scenarios.

use super::world::{TeamMembershipWorld, run_async};
use gecko::{error::ErrorKind, team::domain::MembershipState};
use rstest_bdd_macros::then;

fn membership_of(
    world: &TeamMembershipWorld,
    user: &str,
) -> Result<MembershipState, eyre::Report> {
    let user_id = world.user_id(user)?;
    let team = run_async(world.teams.find_team(world.team_id()?))?;
    Ok(team.membership_state(user_id))
}

#[then(r#""{user}" is a member of the team"#)]
fn is_member(world: &TeamMembershipWorld, user: String) -> Result<(), eyre::Report> {
    let state = membership_of(world, &user)?;
    eyre::ensure!(
        state == MembershipState::Member,
        "expected {user} to be a member, found {state:?}"
    );
    Ok(())
}

#[then(r#""{user}" is unrelated to the team"#)]
fn is_unrelated(world: &TeamMembershipWorld, user: String) -> Result<(), eyre::Report> {
    let state = membership_of(world, &user)?;
    eyre::ensure!(
        state == MembershipState::Unrelated,
        "expected {user} to be unrelated, found {state:?}"
    );
    Ok(())
}

#[then(r#""{user}" has no pending invitations"#)]
fn has_no_pending_invitations(
    world: &TeamMembershipWorld,
    user: String,
) -> Result<(), eyre::Report> {
    let pending = run_async(world.invitations.pending_invites(world.user_id(&user)?))?;
    eyre::ensure!(pending.is_empty(), "{user} still has {} invitations", pending.len());
    Ok(())
}

#[then(r#""{user}" administers the team"#)]
fn administers(world: &TeamMembershipWorld, user: String) -> Result<(), eyre::Report> {
    let user_id = world.user_id(&user)?;
    let team = run_async(world.teams.find_team(world.team_id()?))?;
    eyre::ensure!(team.admin() == user_id, "expected {user} to administer the team");
    eyre::ensure!(team.is_member(user_id), "the admin must also be a member");
    Ok(())
}

#[then("the team no longer exists")]
fn team_is_gone(world: &TeamMembershipWorld) -> Result<(), eyre::Report> {
    let result = run_async(world.teams.find_team(world.team_id()?));
    match result {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        other => Err(eyre::eyre!("expected the team to be gone, got {other:?}")),
    }
}

#[then(r#"the request is refused as "{kind}""#)]
fn request_refused(world: &TeamMembershipWorld, kind: String) -> Result<(), eyre::Report> {
    let expected = match kind.as_str() {
        "permission denied" => ErrorKind::PermissionDenied,
        "invalid member" => ErrorKind::InvalidMember,
        "not found" => ErrorKind::NotFound,
        other => return Err(eyre::eyre!("unknown error kind in scenario: {other}")),
    };
    eyre::ensure!(
        world.last_error == Some(expected),
        "expected {expected:?}, got {:?}",
        world.last_error
    );
    Ok(())
}
