// Infrastructure error types
use thiserror::Error;

/// Errors raised by mirror stores
///
/// These are infrastructure failures: they are never turned into mirror
/// error records and always propagate to whoever drives the stream.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }

    pub fn query_error(message: impl Into<String>) -> Self {
        StoreError::QueryError(message.into())
    }
}
