//! Transactional SQLite storage adapter for the datastore layer.
//!
//! # Intention
//!
//! - Turn a callback-driven, single-connection SQL engine into an async API.
//! - Apply mixed insert/update/delete batches all-or-nothing inside one
//!   native transaction.
//! - Extract results per statement and hand them back in declaration order.
//!
//! # Architectural Boundaries
//!
//! - Atomicity belongs to the engine; this crate only sequences statements
//!   and observes their outcomes.
//! - No pooling, retries, query planning or sync/conflict policy.
//!
//! # Layout
//!
//! - [`engine`]: the capability an engine binding must provide.
//! - [`executor`], [`extract`], [`runner`], [`coordinator`]: the batch
//!   execution core, generic over any [`Engine`].
//! - [`sqlite`] and [`database`]: the rusqlite binding and connection
//!   lifecycle.

pub mod coordinator;
pub mod database;
pub mod engine;
pub mod error;
pub mod executor;
pub mod extract;
pub mod rows;
pub mod runner;
pub mod sqlite;
pub mod statement;
pub mod value;

pub use coordinator::BatchCoordinator;
pub use database::SqliteDatabase;
pub use engine::{Engine, Settle, TransactionContext, TransactionMode};
pub use error::{DatabaseError, SqliteError};
pub use extract::{Discard, Extraction, FirstOrNone, Whole};
pub use rows::RowSequence;
pub use runner::TransactionRunner;
pub use sqlite::{SqliteConfig, SqliteEngine};
pub use statement::{ParameterizedStatement, StatementBatch};
pub use value::{Row, Value};
