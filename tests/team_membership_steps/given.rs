//! Given steps for team membership BDD scenarios.

use super::world::{TeamMembershipWorld, run_async};
use eyre::WrapErr;
use gecko::{
    identity::{
        domain::{User, UserProfile},
        ports::UserRepository,
    },
    team::services::CreateTeamRequest,
};
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"a user "{handle}" named "{name}""#)]
fn registered_user(
    world: &mut TeamMembershipWorld,
    handle: String,
    name: String,
) -> Result<(), eyre::Report> {
    let (first, last) = name
        .split_once(' ')
        .ok_or_else(|| eyre::eyre!("expected a first and last name, got {name:?}"))?;
    let email = format!("{}@example.org", handle.trim_start_matches('@'));
    let profile = UserProfile::parse(handle.as_str(), first, last, email)
        .wrap_err("parse scenario user profile")?;
    let mut user = User::register(profile, &DefaultClock);
    user.activate(&DefaultClock);
    run_async(world.user_repository.store(&user)).wrap_err("store scenario user")?;
    world.users.insert(handle, user);
    Ok(())
}

#[given(r#""{admin}" administers the team "{name}""#)]
fn administered_team(
    world: &mut TeamMembershipWorld,
    admin: String,
    name: String,
) -> Result<(), eyre::Report> {
    let admin_id = world.user_id(&admin)?;
    let team = run_async(world.teams.create_team(CreateTeamRequest::new(name, admin_id)))
        .wrap_err("create scenario team")?;
    world.team_id = Some(team.id());
    Ok(())
}

#[given(r#""{admin}" invites "{invitee}""#)]
fn admin_invites(
    world: &mut TeamMembershipWorld,
    admin: String,
    invitee: String,
) -> Result<(), eyre::Report> {
    let team_id = world.team_id()?;
    let admin_id = world.user_id(&admin)?;
    let invitee_id = world.user_id(&invitee)?;
    run_async(world.invitations.invite(team_id, admin_id, invitee_id))
        .wrap_err("invite in scenario setup")?;
    Ok(())
}

#[given(r#""{user}" accepts the invitation"#)]
fn invitation_already_accepted(
    world: &mut TeamMembershipWorld,
    user: String,
) -> Result<(), eyre::Report> {
    let team_id = world.team_id()?;
    let user_id = world.user_id(&user)?;
    let accepted = run_async(world.invitations.accept(user_id, team_id))
        .wrap_err("accept invitation in scenario setup")?;
    eyre::ensure!(accepted, "expected a pending invitation for {user}");
    Ok(())
}
