//! Diesel schema for team persistence.

diesel::table! {
    /// Teams and their current admin.
    teams (id) {
        /// Internal team identifier.
        id -> Uuid,
        /// Unique team name.
        #[max_length = 50]
        name -> Varchar,
        /// Free-text description.
        #[max_length = 500]
        description -> Varchar,
        /// Current admin, always also present in `team_members`.
        admin_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Team membership, one row per (team, user).
    team_members (team_id, user_id) {
        /// Owning team.
        team_id -> Uuid,
        /// Member.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Pending invites, one row per (team, user).
    team_invites (team_id, user_id) {
        /// Inviting team.
        team_id -> Uuid,
        /// Invited user.
        user_id -> Uuid,
    }
}
