//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Every adapter offloads synchronous Diesel work onto the blocking thread
//! pool so repository calls never stall the async executor.

use crate::settings::DatabaseSettings;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by every Gecko adapter.
pub type GeckoPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(settings: &DatabaseSettings) -> Result<GeckoPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    Pool::builder()
        .max_size(settings.max_pool_size)
        .build(manager)
}

/// Failure raised before a blocking database closure gets to run.
#[derive(Debug, Error)]
pub enum BlockingError {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// The blocking task panicked or was cancelled.
    #[error("blocking task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Runs a Diesel closure on a pooled connection inside
/// [`tokio::task::spawn_blocking`].
pub(crate) async fn run_blocking<F, T, E>(pool: &GeckoPgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<BlockingError> + Send + 'static,
{
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared.get().map_err(BlockingError::from)?;
        f(&mut connection)
    })
    .await
    .map_err(BlockingError::from)?
}
