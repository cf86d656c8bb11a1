//! Connection lifecycle around the batch core.
//!
//! [`SqliteDatabase`] owns the one connection handle. Opening, closing and
//! clearing take `&mut self`, so none of them can overlap an operation that
//! is still in flight.

use std::{fs, io, path::Path};

use crate::coordinator::BatchCoordinator;
use crate::error::{DatabaseError, Result};
use crate::rows::RowSequence;
use crate::sqlite::{SqliteConfig, SqliteEngine};
use crate::statement::{ParameterizedStatement, StatementBatch};
use crate::value::Row;

pub struct SqliteDatabase {
    config: SqliteConfig,
    coordinator: Option<BatchCoordinator<SqliteEngine>>,
}

impl SqliteDatabase {
    /// Create an unopened database for `config`.
    pub fn new(config: SqliteConfig) -> Self {
        Self {
            config,
            coordinator: None,
        }
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.coordinator.is_some()
    }

    /// Open the handle and apply the configured schema. Does nothing if the
    /// handle is already open.
    pub async fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Ok(());
        }
        log::info!("opening sqlite database at path: {}", self.config.db_path);
        let coordinator = BatchCoordinator::new(SqliteEngine::open(&self.config)?);
        if !self.config.schema.is_empty() {
            coordinator.create_schema(self.config.schema.iter().cloned()).await?;
        }
        self.coordinator = Some(coordinator);
        Ok(())
    }

    /// Release the handle. Later operations fail with
    /// [`DatabaseError::NotOpen`] until [`open`](Self::open) is called again.
    pub fn close(&mut self) {
        if self.coordinator.take().is_some() {
            log::info!("closed sqlite database at path: {}", self.config.db_path);
        }
    }

    /// Close the handle and delete the persisted store.
    pub fn clear(&mut self) -> Result<()> {
        self.close();
        if self.config.is_memory() {
            return Ok(());
        }
        remove_store(Path::new(&self.config.db_path))?;
        log::info!("cleared sqlite database at path: {}", self.config.db_path);
        Ok(())
    }

    fn coordinator(&self) -> Result<&BatchCoordinator<SqliteEngine>> {
        self.coordinator.as_ref().ok_or(DatabaseError::NotOpen)
    }

    /// Every row of `statement` in a read-only transaction.
    pub async fn read_all(&self, statement: ParameterizedStatement) -> Result<RowSequence<Row>> {
        Ok(self.coordinator()?.read_all(statement).await?)
    }

    /// First row of `statement`, or `None`.
    pub async fn read_one(&self, statement: ParameterizedStatement) -> Result<Option<Row>> {
        Ok(self.coordinator()?.read_one(statement).await?)
    }

    pub async fn write(&self, statement: ParameterizedStatement) -> Result<()> {
        Ok(self.coordinator()?.write(statement).await?)
    }

    pub async fn batched_read(&self, statements: StatementBatch) -> Result<Vec<Option<Row>>> {
        Ok(self.coordinator()?.batched_read(statements).await?)
    }

    /// Saves, then deletes, all-or-nothing.
    pub async fn batched_write(
        &self,
        saves: StatementBatch,
        deletes: StatementBatch,
    ) -> Result<()> {
        Ok(self.coordinator()?.batched_write(saves, deletes).await?)
    }

    pub async fn select_then_delete(
        &self,
        select: ParameterizedStatement,
        deletes: impl Into<StatementBatch>,
    ) -> Result<RowSequence<Row>> {
        Ok(self.coordinator()?.select_then_delete(select, deletes).await?)
    }

    /// Bare SQL statements in one read-write transaction.
    pub async fn execute_raw<I, S>(&self, statements: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(self.coordinator()?.execute_raw(statements).await?)
    }

    pub async fn create_schema<I, S>(&self, statements: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(self.coordinator()?.create_schema(statements).await?)
    }
}

/// Delete the store and the WAL/journal files SQLite may leave beside it.
fn remove_store(path: &Path) -> io::Result<()> {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        match fs::remove_file(&file) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
