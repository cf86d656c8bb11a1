use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params_from_iter, Connection, Transaction, TransactionBehavior};
use std::{fs, path::Path, sync::Arc, time::Duration};

use crate::engine::{Engine, Settle, TransactionContext, TransactionMode};
use crate::error::SqliteError;
use crate::rows::RowSequence;
use crate::statement::ParameterizedStatement;
use crate::value::{Row, Value};

/// File name of the store inside its `SQLite` directory.
pub const DEFAULT_DATABASE_NAME: &str = "AmplifyDatastore";

const MEMORY_PATH: &str = ":memory:";

/// SQLite storage configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    /// Path to the SQLite database file, or `:memory:`
    pub db_path: String,
    /// Statements applied on every open; use `IF NOT EXISTS` forms.
    pub schema: Vec<String>,
    pub busy_timeout: Duration,
    pub foreign_keys: bool,
}

impl SqliteConfig {
    /// Create a new SQLite config with path and schema
    pub fn new(db_path: impl Into<String>, schema: Vec<String>) -> Self {
        Self {
            db_path: db_path.into(),
            schema,
            busy_timeout: Duration::from_millis(1_000),
            foreign_keys: true,
        }
    }

    /// Store at `<dir>/SQLite/AmplifyDatastore`.
    pub fn in_directory(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join("SQLite").join(DEFAULT_DATABASE_NAME);
        Self::new(path.to_string_lossy().into_owned(), Vec::new())
    }

    pub fn in_memory() -> Self {
        Self::new(MEMORY_PATH, Vec::new())
    }

    pub fn with_schema<I, S>(mut self, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema = statements.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn is_memory(&self) -> bool {
        self.db_path == MEMORY_PATH
    }
}

/// [`Engine`] over a single rusqlite connection.
///
/// Transactions run one at a time on the blocking pool; the connection mutex
/// serializes them.
#[derive(Clone)]
pub struct SqliteEngine {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteEngine {
    /// Open the connection described by `config` and apply its pragmas.
    /// Creates the parent directory of a file store if needed.
    pub fn open(config: &SqliteConfig) -> Result<Self, SqliteError> {
        let connection = if config.is_memory() {
            Connection::open_in_memory()?
        } else {
            let path = Path::new(&config.db_path);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            Connection::open(path)?
        };
        connection.busy_timeout(config.busy_timeout)?;
        connection.pragma_update(None, "foreign_keys", config.foreign_keys)?;
        Ok(Self::from_connection(connection))
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
        }
    }
}

#[async_trait]
impl Engine for SqliteEngine {
    type Row = Row;
    type Error = SqliteError;

    async fn transaction<F>(&self, mode: TransactionMode, body: F) -> Result<(), SqliteError>
    where
        F: FnOnce(&mut dyn TransactionContext<Self::Row, Self::Error>) + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        let worker = tokio::task::spawn_blocking(move || {
            let mut conn = connection.lock();
            run_transaction(&mut conn, mode, body)
        });
        match worker.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(SqliteError::WorkerAborted),
        }
    }
}

fn run_transaction<F>(
    conn: &mut Connection,
    mode: TransactionMode,
    body: F,
) -> Result<(), SqliteError>
where
    F: FnOnce(&mut dyn TransactionContext<Row, SqliteError>),
{
    let behavior = match mode {
        TransactionMode::ReadOnly => TransactionBehavior::Deferred,
        TransactionMode::ReadWrite => TransactionBehavior::Immediate,
    };
    let tx = conn.transaction_with_behavior(behavior)?;
    if mode.is_read_only() {
        tx.pragma_update(None, "query_only", true)?;
    }

    let mut ctx = SqliteContext { tx: &tx, failed: 0 };
    body(&mut ctx);
    let failed = ctx.failed;

    if mode.is_read_only() {
        tx.pragma_update(None, "query_only", false)?;
    }
    if failed > 0 {
        log::debug!("rolling back transaction after {} failed statement(s)", failed);
        tx.rollback()?;
    } else {
        tx.commit()?;
    }
    Ok(())
}

struct SqliteContext<'t, 'c> {
    tx: &'t Transaction<'c>,
    failed: usize,
}

impl TransactionContext<Row, SqliteError> for SqliteContext<'_, '_> {
    fn execute_statement(
        &mut self,
        statement: &ParameterizedStatement,
        settle: Settle<Row, SqliteError>,
    ) {
        let outcome = query_rows(self.tx, statement);
        if outcome.is_err() {
            self.failed += 1;
        }
        settle(outcome.map_err(SqliteError::from));
    }
}

fn query_rows(
    conn: &Connection,
    statement: &ParameterizedStatement,
) -> rusqlite::Result<RowSequence<Row>> {
    let mut stmt = conn.prepare(statement.sql())?;
    let columns: Arc<[String]> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt.query(params_from_iter(statement.params()))?;

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for index in 0..columns.len() {
            values.push(Value::from(row.get_ref(index)?));
        }
        out.push(Row::new(Arc::clone(&columns), values));
    }
    Ok(RowSequence::from(out))
}
