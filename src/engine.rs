//! The capability an engine binding provides to the batch core.

use async_trait::async_trait;

use crate::rows::RowSequence;
use crate::statement::ParameterizedStatement;

/// Kind of native transaction to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    ReadOnly,
    ReadWrite,
}

impl TransactionMode {
    pub fn is_read_only(self) -> bool {
        matches!(self, TransactionMode::ReadOnly)
    }
}

/// One-shot completion for a dispatched statement. The engine calls it
/// exactly once with the statement's rows or its error.
pub type Settle<R, E> = Box<dyn FnOnce(Result<RowSequence<R>, E>) + Send>;

/// Handle to an open native transaction.
///
/// Only valid inside the body passed to [`Engine::transaction`]; it cannot
/// escape that call.
pub trait TransactionContext<R, E> {
    /// Execute `statement` as part of this transaction. The SQL text and
    /// parameters are passed through unmodified. `settle` may be called
    /// before this returns or at any later point.
    fn execute_statement(&mut self, statement: &ParameterizedStatement, settle: Settle<R, E>);
}

/// A single-connection SQL engine with native all-or-nothing transactions.
///
/// If any statement executed through the context fails, the engine must
/// discard the effects of every statement in that transaction.
#[async_trait]
pub trait Engine: Send + Sync {
    type Row: Send + 'static;
    type Error: Send + 'static;

    /// Open one transaction of `mode` and invoke `body` exactly once with it.
    ///
    /// Returns an error only for failures that belong to no statement, such
    /// as failing to begin or commit.
    async fn transaction<F>(&self, mode: TransactionMode, body: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut dyn TransactionContext<Self::Row, Self::Error>) + Send + 'static;
}
