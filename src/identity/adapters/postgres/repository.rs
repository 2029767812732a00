//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{NewUserRow, UserChangeset, UserRow},
    schema::users,
};
use crate::identity::{
    domain::{EmailAddress, NamePart, PersistedUserData, PersonName, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use crate::persistence::{GeckoPgPool, run_blocking};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: GeckoPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: GeckoPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let row = to_row(user);
        let stored = user.clone();
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_write_error(err, &stored))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let changeset = to_changeset(user);
        let updated_user = user.clone();
        run_blocking(&self.pool, move |connection| {
            let user_id = updated_user.id();
            let updated = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| map_write_error(err, &updated_user))?;
            if updated == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let handle = username.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::username.eq(handle))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let address = email.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::email.eq(address))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_many(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        run_blocking(&self.pool, move |connection| {
            let rows = users::table
                .filter(users::id.eq_any(uuids))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        run_blocking(&self.pool, move |connection| {
            let rows = users::table
                .order((users::last_name.asc(), users::first_name.asc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn to_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        username: user.username().as_str().to_owned(),
        first_name: user.first_name().as_str().to_owned(),
        last_name: user.last_name().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        is_active: user.is_active(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn to_changeset(user: &User) -> UserChangeset {
    UserChangeset {
        username: user.username().as_str().to_owned(),
        first_name: user.first_name().as_str().to_owned(),
        last_name: user.last_name().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        is_active: user.is_active(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let data = PersistedUserData {
        id: UserId::from_uuid(row.id),
        username: Username::new(row.username)
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        first_name: PersonName::new(NamePart::First, row.first_name)
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        last_name: PersonName::new(NamePart::Last, row.last_name)
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        email: EmailAddress::new(row.email)
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(User::from_persisted(data))
}

fn map_write_error(err: DieselError, user: &User) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
            match violated_constraint(info.as_ref()) {
                Some("users_username_key") => {
                    UserRepositoryError::DuplicateUsername(user.username().clone())
                }
                Some("users_email_key") => {
                    UserRepositoryError::DuplicateEmail(user.email().clone())
                }
                _ => UserRepositoryError::DuplicateUser(user.id()),
            }
        }
        _ => UserRepositoryError::persistence(err),
    }
}

fn violated_constraint(info: &dyn DatabaseErrorInformation) -> Option<&str> {
    info.constraint_name()
}
