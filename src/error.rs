//! Error types for contactmethod.

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatabaseError {
    /// Map unique/foreign key failures to `Constraint`, keep everything else as is.
    pub(crate) fn from_write(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref e, ref msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
            }
            other => Self::Sqlite(other),
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    NoConfigDir,

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors turning raw mail into an inbound message.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Message could not be parsed")]
    Unparseable,

    #[error("Message has no sender address")]
    MissingSender,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a pipeline run for one message.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
