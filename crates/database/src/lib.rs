//! Workshop Database Layer
//!
//! Pooled access to the vehicle-workshop schema. Every operation goes
//! through one executor that acquires a pooled connection, runs a single
//! parameterized statement inside its own transaction and hands back rows,
//! a success marker or a classified error.

mod config;
mod executor;
pub mod forms;
mod models;
mod queries;
mod schema;

pub use config::{Credentials, DatabaseConfig, Target, DEFAULT_POOL_SIZE};
pub use executor::{QueryMode, QueryOutcome, Row, Value};
pub use models::*;
pub use schema::{ConnectionStatus, Database, Pool};

use thiserror::Error;

/// Every failure the data-access layer can report, carrying the driver's
/// message as payload.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Constraint violated: {0}")]
    ConstraintViolated(String),

    #[error("Invalid statement: {0}")]
    SyntaxInvalid(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

impl DatabaseError {
    /// Wrap an error raised while obtaining a connection, whatever its shape.
    pub(crate) fn connection(err: sqlx::Error) -> Self {
        Self::ConnectionFailed(err.to_string())
    }

    /// The driver message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ConnectionFailed(m)
            | Self::ConstraintViolated(m)
            | Self::SyntaxInvalid(m)
            | Self::NotFound(m)
            | Self::QueryFailed(m)
            | Self::Migration(m) => m,
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound(err.to_string()),
            sqlx::Error::Database(db) => classify_database_error(db.as_ref()),
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::ConnectionFailed(err.to_string()),
            _ => Self::QueryFailed(err.to_string()),
        }
    }
}

fn classify_database_error(db: &dyn sqlx::error::DatabaseError) -> DatabaseError {
    use sqlx::error::ErrorKind;

    let message = db.message().to_string();
    let code = db.code().map(|c| c.into_owned()).unwrap_or_default();

    match db.kind() {
        ErrorKind::UniqueViolation
        | ErrorKind::ForeignKeyViolation
        | ErrorKind::NotNullViolation
        | ErrorKind::CheckViolation => return DatabaseError::ConstraintViolated(message),
        _ => {}
    }

    // MySQL reports SQLSTATE; SQLite reports its own result codes, so fall
    // back to the message text there.
    let lowered = message.to_lowercase();
    if code.starts_with("23") || lowered.contains("constraint failed") {
        DatabaseError::ConstraintViolated(message)
    } else if code.starts_with("42")
        || lowered.contains("syntax error")
        || lowered.starts_with("no such")
    {
        DatabaseError::SyntaxInvalid(message)
    } else {
        DatabaseError::QueryFailed(message)
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
