//! When steps for team membership BDD scenarios.

use super::world::{TeamMembershipWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{user}" accepts the invitation"#)]
fn accept_invitation(world: &mut TeamMembershipWorld, user: String) -> Result<(), eyre::Report> {
    let team_id = world.team_id()?;
    let user_id = world.user_id(&user)?;
    run_async(world.invitations.accept(user_id, team_id)).wrap_err("accept invitation")?;
    Ok(())
}

#[when(r#""{user}" rejects the invitation"#)]
fn reject_invitation(world: &mut TeamMembershipWorld, user: String) -> Result<(), eyre::Report> {
    let team_id = world.team_id()?;
    let user_id = world.user_id(&user)?;
    run_async(world.invitations.reject(user_id, team_id)).wrap_err("reject invitation")?;
    Ok(())
}

#[when(r#""{requester}" invites "{invitee}""#)]
fn attempt_invite(
    world: &mut TeamMembershipWorld,
    requester: String,
    invitee: String,
) -> Result<(), eyre::Report> {
    let team_id = world.team_id()?;
    let requester_id = world.user_id(&requester)?;
    let invitee_id = world.user_id(&invitee)?;
    world.last_error = run_async(world.invitations.invite(team_id, requester_id, invitee_id))
        .err()
        .map(|err| err.kind());
    Ok(())
}

#[when(r#""{user}" leaves the team"#)]
fn leave_team(world: &mut TeamMembershipWorld, user: String) -> Result<(), eyre::Report> {
    let team_id = world.team_id()?;
    let user_id = world.user_id(&user)?;
    run_async(world.teams.leave_team(team_id, user_id, None)).wrap_err("leave team")?;
    Ok(())
}

#[when(r#""{requester}" removes "{member}" from the team"#)]
fn remove_member(
    world: &mut TeamMembershipWorld,
    requester: String,
    member: String,
) -> Result<(), eyre::Report> {
    let team_id = world.team_id()?;
    let requester_id = world.user_id(&requester)?;
    let member_id = world.user_id(&member)?;
    world.last_error = run_async(world.teams.remove_members(team_id, requester_id, &[member_id]))
        .err()
        .map(|err| err.kind());
    Ok(())
}
