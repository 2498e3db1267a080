//! error type for database operations.

use thiserror::Error;

/// errors produced by the database layer.
#[derive(Debug, Error)]
pub enum Error {
    /// could not connect to the database.
    #[error("database connection error: {0}")]
    Connection(String),

    /// a migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// a query failed.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// stored data could not be interpreted.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// stored json could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
