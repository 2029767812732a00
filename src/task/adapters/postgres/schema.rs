//! Diesel schema for task persistence.

diesel::table! {
    /// Tasks owned by teams; rows cascade with their team.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning team.
        team_id -> Uuid,
        /// Assigned member.
        assignee_id -> Uuid,
        /// Task title.
        #[max_length = 50]
        title -> Varchar,
        /// Task description, empty when absent.
        #[max_length = 400]
        description -> Varchar,
        /// Due date.
        due_date -> Timestamptz,
        /// Progress status.
        #[max_length = 12]
        status -> Varchar,
        /// Priority rank, 1 (low) to 3 (high).
        priority -> Int2,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
