//! `PostgreSQL` repository implementation for team aggregates.
//!
//! The team row, member rows and invite rows are written in one transaction.

use super::{
    models::{NewTeamRow, TeamChangeset, TeamInviteRow, TeamMemberRow, TeamRow},
    schema::{team_invites, team_members, teams},
};
use crate::identity::domain::UserId;
use crate::persistence::{BlockingError, GeckoPgPool, run_blocking};
use crate::team::{
    domain::{PersistedTeamData, Team, TeamDescription, TeamId, TeamName},
    ports::{TeamRepository, TeamRepositoryError, TeamRepositoryResult, TeamWrite},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

const TEAM_NAME_CONSTRAINT: &str = "teams_name_key";

/// `PostgreSQL`-backed team repository.
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: GeckoPgPool,
}

impl PostgresTeamRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: GeckoPgPool) -> Self {
        Self { pool }
    }
}

impl From<DieselError> for TeamRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// Failure inside a [`TeamRepository::modify`] transaction: either the store
/// failed or the caller's change was refused.
enum ModifyError<E> {
    Store(TeamRepositoryError),
    Rejected(E),
}

impl<E: From<TeamRepositoryError>> ModifyError<E> {
    fn into_inner(self) -> E {
        match self {
            Self::Store(err) => E::from(err),
            Self::Rejected(err) => err,
        }
    }
}

impl<E> From<TeamRepositoryError> for ModifyError<E> {
    fn from(err: TeamRepositoryError) -> Self {
        Self::Store(err)
    }
}

impl<E> From<DieselError> for ModifyError<E> {
    fn from(err: DieselError) -> Self {
        Self::Store(err.into())
    }
}

impl<E> From<BlockingError> for ModifyError<E> {
    fn from(err: BlockingError) -> Self {
        Self::Store(err.into())
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()> {
        let stored = team.clone();
        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, TeamRepositoryError, _>(|tx| {
                diesel::insert_into(teams::table)
                    .values(&to_row(&stored))
                    .execute(tx)
                    .map_err(|err| map_write_error(err, &stored))?;
                write_relations(tx, &stored)
            })
        })
        .await
    }

    async fn modify<F, R, E>(&self, id: TeamId, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut Team) -> Result<(TeamWrite, R), E> + Send + 'static,
        R: Send + 'static,
        E: From<TeamRepositoryError> + Send + 'static,
    {
        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, ModifyError<E>, _>(|tx| {
                // The row lock serializes concurrent read-modify-write cycles.
                let row = teams::table
                    .filter(teams::id.eq(id.into_inner()))
                    .select(TeamRow::as_select())
                    .for_update()
                    .first::<TeamRow>(tx)
                    .optional()?
                    .ok_or(TeamRepositoryError::NotFound(id))?;
                let mut team = hydrate(tx, vec![row])?
                    .into_iter()
                    .next()
                    .ok_or(TeamRepositoryError::NotFound(id))?;

                let (write, result) = change(&mut team).map_err(ModifyError::Rejected)?;
                match write {
                    TeamWrite::Unchanged => {}
                    TeamWrite::Save => replace_team(tx, &team)?,
                    TeamWrite::Delete => {
                        // Members, invites and tasks cascade with the team row.
                        diesel::delete(teams::table.filter(teams::id.eq(id.into_inner())))
                            .execute(tx)?;
                    }
                }
                Ok(result)
            })
        })
        .await
        .map_err(ModifyError::into_inner)
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        run_blocking(&self.pool, move |connection| {
            let rows = teams::table
                .filter(teams::id.eq(id.into_inner()))
                .select(TeamRow::as_select())
                .load::<TeamRow>(connection)?;
            Ok(hydrate(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn find_by_name(&self, name: &TeamName) -> TeamRepositoryResult<Option<Team>> {
        let team_name = name.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let rows = teams::table
                .filter(teams::name.eq(team_name))
                .select(TeamRow::as_select())
                .load::<TeamRow>(connection)?;
            Ok(hydrate(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn list_for_member(&self, user: UserId) -> TeamRepositoryResult<Vec<Team>> {
        run_blocking(&self.pool, move |connection| {
            let team_ids = team_members::table
                .filter(team_members::user_id.eq(user.into_inner()))
                .select(team_members::team_id)
                .load::<Uuid>(connection)?;
            load_teams(connection, team_ids)
        })
        .await
    }

    async fn list_invites_for(&self, user: UserId) -> TeamRepositoryResult<Vec<Team>> {
        run_blocking(&self.pool, move |connection| {
            let team_ids = team_invites::table
                .filter(team_invites::user_id.eq(user.into_inner()))
                .select(team_invites::team_id)
                .load::<Uuid>(connection)?;
            load_teams(connection, team_ids)
        })
        .await
    }
}

/// Rewrites the team row and replaces its member and invite rows.
fn replace_team(connection: &mut PgConnection, team: &Team) -> TeamRepositoryResult<()> {
    let team_id = team.id().into_inner();
    let updated = diesel::update(teams::table.filter(teams::id.eq(team_id)))
        .set(&to_changeset(team))
        .execute(connection)
        .map_err(|err| map_write_error(err, team))?;
    if updated == 0 {
        return Err(TeamRepositoryError::NotFound(team.id()));
    }

    diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id)))
        .execute(connection)?;
    diesel::delete(team_invites::table.filter(team_invites::team_id.eq(team_id)))
        .execute(connection)?;
    write_relations(connection, team)
}

fn write_relations(connection: &mut PgConnection, team: &Team) -> TeamRepositoryResult<()> {
    let team_id = team.id().into_inner();
    let members: Vec<TeamMemberRow> = team
        .members()
        .iter()
        .map(|user| TeamMemberRow {
            team_id,
            user_id: user.into_inner(),
        })
        .collect();
    let invites: Vec<TeamInviteRow> = team
        .invitees()
        .iter()
        .map(|user| TeamInviteRow {
            team_id,
            user_id: user.into_inner(),
        })
        .collect();

    diesel::insert_into(team_members::table)
        .values(&members)
        .execute(connection)?;
    if !invites.is_empty() {
        diesel::insert_into(team_invites::table)
            .values(&invites)
            .execute(connection)?;
    }
    Ok(())
}

fn load_teams(connection: &mut PgConnection, ids: Vec<Uuid>) -> TeamRepositoryResult<Vec<Team>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = teams::table
        .filter(teams::id.eq_any(ids))
        .order(teams::name.asc())
        .select(TeamRow::as_select())
        .load::<TeamRow>(connection)?;
    hydrate(connection, rows)
}

/// Attaches member and invite sets to team rows, preserving row order.
fn hydrate(connection: &mut PgConnection, rows: Vec<TeamRow>) -> TeamRepositoryResult<Vec<Team>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let mut members = group_by_team(
        team_members::table
            .filter(team_members::team_id.eq_any(ids.clone()))
            .select(TeamMemberRow::as_select())
            .load::<TeamMemberRow>(connection)?
            .into_iter()
            .map(|row| (row.team_id, row.user_id)),
    );
    let mut invites = group_by_team(
        team_invites::table
            .filter(team_invites::team_id.eq_any(ids))
            .select(TeamInviteRow::as_select())
            .load::<TeamInviteRow>(connection)?
            .into_iter()
            .map(|row| (row.team_id, row.user_id)),
    );

    rows.into_iter()
        .map(|row| {
            let member_ids = members.remove(&row.id).unwrap_or_default();
            let invitee_ids = invites.remove(&row.id).unwrap_or_default();
            row_to_team(row, member_ids, invitee_ids)
        })
        .collect()
}

fn group_by_team(
    pairs: impl Iterator<Item = (Uuid, Uuid)>,
) -> HashMap<Uuid, BTreeSet<UserId>> {
    let mut grouped: HashMap<Uuid, BTreeSet<UserId>> = HashMap::new();
    for (team_id, user_id) in pairs {
        grouped
            .entry(team_id)
            .or_default()
            .insert(UserId::from_uuid(user_id));
    }
    grouped
}

fn to_row(team: &Team) -> NewTeamRow {
    NewTeamRow {
        id: team.id().into_inner(),
        name: team.name().as_str().to_owned(),
        description: team.description().as_str().to_owned(),
        admin_id: team.admin().into_inner(),
        created_at: team.created_at(),
        updated_at: team.updated_at(),
    }
}

fn to_changeset(team: &Team) -> TeamChangeset {
    TeamChangeset {
        name: team.name().as_str().to_owned(),
        description: team.description().as_str().to_owned(),
        admin_id: team.admin().into_inner(),
        updated_at: team.updated_at(),
    }
}

fn row_to_team(
    row: TeamRow,
    members: BTreeSet<UserId>,
    invitees: BTreeSet<UserId>,
) -> TeamRepositoryResult<Team> {
    let data = PersistedTeamData {
        id: TeamId::from_uuid(row.id),
        name: TeamName::new(row.name).map_err(TeamRepositoryError::invalid_persisted_data)?,
        description: TeamDescription::new(row.description)
            .map_err(TeamRepositoryError::invalid_persisted_data)?,
        admin: UserId::from_uuid(row.admin_id),
        members,
        invitees,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Team::from_persisted(data))
}

fn map_write_error(err: DieselError, team: &Team) -> TeamRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_name_violation(info.as_ref()) =>
        {
            TeamRepositoryError::DuplicateTeamName(team.name().clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TeamRepositoryError::DuplicateTeam(team.id())
        }
        _ => TeamRepositoryError::persistence(err),
    }
}

fn is_name_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name() == Some(TEAM_NAME_CONSTRAINT)
}
