//! Diesel row models for team persistence.

use super::schema::{team_invites, team_members, teams};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for team records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamRow {
    /// Internal team identifier.
    pub id: uuid::Uuid,
    /// Unique team name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Current admin.
    pub admin_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for team records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    /// Internal team identifier.
    pub id: uuid::Uuid,
    /// Unique team name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Current admin.
    pub admin_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for the mutable team columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = teams)]
pub struct TeamChangeset {
    /// Unique team name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Current admin.
    pub admin_id: uuid::Uuid,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Membership row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamMemberRow {
    /// Owning team.
    pub team_id: uuid::Uuid,
    /// Member.
    pub user_id: uuid::Uuid,
}

/// Pending invite row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = team_invites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamInviteRow {
    /// Inviting team.
    pub team_id: uuid::Uuid,
    /// Invited user.
    pub user_id: uuid::Uuid,
}
