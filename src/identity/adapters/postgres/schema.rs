//! Diesel schema for user persistence.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Unique `@handle`.
        #[max_length = 30]
        username -> Varchar,
        /// Given name.
        #[max_length = 50]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 50]
        last_name -> Varchar,
        /// Unique email address.
        #[max_length = 254]
        email -> Varchar,
        /// Whether the account has been activated.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
