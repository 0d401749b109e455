use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

/// Errors surfaced by the persistence access layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to get database connection: {0}")]
    Pool(#[from] deadpool::managed::PoolError<PoolError>),

    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),
}

impl StoreError {
    /// True when the underlying query found no matching row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Query(diesel::result::Error::NotFound))
    }
}
