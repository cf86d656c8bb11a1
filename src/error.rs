use thiserror::Error;

/// Error reported by [`SqliteEngine`](crate::sqlite::SqliteEngine) for a
/// statement or a transaction.
#[derive(Debug, Error)]
pub enum SqliteError {
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking task running the transaction was cancelled before it
    /// finished, typically because the runtime is shutting down.
    #[error("SQLite worker task aborted")]
    WorkerAborted,
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("database is not open")]
    NotOpen,

    #[error(transparent)]
    Engine(#[from] SqliteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = DatabaseError> = std::result::Result<T, E>;
