//! Public batch operations over any [`Engine`].
//!
//! Every operation opens exactly one transaction, dispatches its statements
//! in declared order and settles once. Results are collected in dispatch
//! order, so the error surfaced for a failing batch is the first failing
//! statement by position, whatever order the engine completed them in.
//! Engine errors are returned as-is.

use crate::engine::{Engine, TransactionMode};
use crate::executor::{prepare, Dispatch, Pending};
use crate::extract::{Discard, Extraction, FirstOrNone, Whole};
use crate::rows::RowSequence;
use crate::runner::TransactionRunner;
use crate::statement::{ParameterizedStatement, StatementBatch};

pub struct BatchCoordinator<E> {
    engine: E,
}

impl<E: Engine> BatchCoordinator<E> {
    /// Create a new coordinator that owns `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn runner(&self) -> TransactionRunner<'_, E> {
        TransactionRunner::new(&self.engine)
    }

    /// Every row of `statement`; empty when it matched nothing.
    pub async fn read_all(
        &self,
        statement: ParameterizedStatement,
    ) -> Result<RowSequence<E::Row>, E::Error> {
        self.single(TransactionMode::ReadOnly, statement, Whole).await
    }

    /// First row of `statement`, or `None`.
    pub async fn read_one(
        &self,
        statement: ParameterizedStatement,
    ) -> Result<Option<E::Row>, E::Error> {
        self.single(TransactionMode::ReadOnly, statement, FirstOrNone).await
    }

    /// Execute one write; rows it returns are ignored.
    pub async fn write(&self, statement: ParameterizedStatement) -> Result<(), E::Error> {
        self.single(TransactionMode::ReadWrite, statement, Discard).await
    }

    /// First row of each statement, positionally aligned with `statements`.
    pub async fn batched_read(
        &self,
        statements: StatementBatch,
    ) -> Result<Vec<Option<E::Row>>, E::Error> {
        let (dispatches, pendings) = prepare_all(statements, FirstOrNone);
        let mut failure = self.runner().read_only(dispatches).await.err();
        let values = settle_in_order(pendings, &mut failure).await?;
        finish(failure, values)
    }

    /// Apply every save, then every delete, in one read-write transaction.
    /// Two empty batches still open (and commit) a transaction.
    pub async fn batched_write(
        &self,
        saves: StatementBatch,
        deletes: StatementBatch,
    ) -> Result<(), E::Error> {
        log::debug!("batched write: {} save(s), {} delete(s)", saves.len(), deletes.len());
        let (dispatches, pendings) = prepare_all(saves.into_iter().chain(deletes), Discard);
        let mut failure = self.runner().read_write(dispatches).await.err();
        settle_in_order(pendings, &mut failure).await?;
        finish(failure, ())
    }

    /// Run `select`, then `deletes`, in the same transaction and return the
    /// selected rows. A failing delete fails the whole call.
    pub async fn select_then_delete(
        &self,
        select: ParameterizedStatement,
        deletes: impl Into<StatementBatch>,
    ) -> Result<RowSequence<E::Row>, E::Error> {
        let (select_dispatch, selected) = prepare(select, Whole);
        let (delete_dispatches, deleted) = prepare_all(deletes.into(), Discard);

        let mut dispatches = Vec::with_capacity(delete_dispatches.len() + 1);
        dispatches.push(select_dispatch);
        dispatches.extend(delete_dispatches);

        let mut failure = self.runner().read_write(dispatches).await.err();
        let rows = resolve(selected, &mut failure).await?;
        settle_in_order(deleted, &mut failure).await?;
        finish(failure, rows)
    }

    /// Execute bare SQL statements in order, without parameters.
    pub async fn execute_raw<I, S>(&self, statements: I) -> Result<(), E::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (dispatches, pendings) =
            prepare_all(statements.into_iter().map(ParameterizedStatement::new), Discard);
        let mut failure = self.runner().read_write(dispatches).await.err();
        settle_in_order(pendings, &mut failure).await?;
        finish(failure, ())
    }

    /// Schema setup; the same operation as [`execute_raw`](Self::execute_raw).
    pub async fn create_schema<I, S>(&self, statements: I) -> Result<(), E::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_raw(statements).await
    }

    async fn single<X>(
        &self,
        mode: TransactionMode,
        statement: ParameterizedStatement,
        extraction: X,
    ) -> Result<X::Output, E::Error>
    where
        X: Extraction<E::Row>,
    {
        let (dispatch, pending) = prepare(statement, extraction);
        let mut failure = self.runner().run(mode, vec![dispatch]).await.err();
        let output = resolve(pending, &mut failure).await?;
        finish(failure, output)
    }
}

type Prepared<R, E, X> = (Vec<Dispatch<R, E>>, Vec<Pending<R, E, X>>);

fn prepare_all<R, E, X>(
    statements: impl IntoIterator<Item = ParameterizedStatement>,
    extraction: X,
) -> Prepared<R, E, X>
where
    X: Extraction<R> + Clone,
{
    statements
        .into_iter()
        .map(|statement| prepare(statement, extraction.clone()))
        .unzip()
}

/// Settle one statement. A statement the engine never settled takes the
/// transaction's own error; without one the operation stays pending.
async fn resolve<R, E, X>(
    pending: Pending<R, E, X>,
    failure: &mut Option<E>,
) -> Result<X::Output, E>
where
    X: Extraction<R>,
{
    match pending.settle().await {
        Some(outcome) => outcome,
        None => match failure.take() {
            Some(err) => Err(err),
            None => {
                log::warn!("engine dropped a statement callback without settling it");
                futures::future::pending().await
            }
        },
    }
}

/// First error by position wins; later pendings are dropped unawaited.
async fn settle_in_order<R, E, X>(
    pendings: Vec<Pending<R, E, X>>,
    failure: &mut Option<E>,
) -> Result<Vec<X::Output>, E>
where
    X: Extraction<R>,
{
    let mut outputs = Vec::with_capacity(pendings.len());
    for pending in pendings {
        outputs.push(resolve(pending, failure).await?);
    }
    Ok(outputs)
}

/// Statement outcomes take precedence; a transaction-level error only
/// surfaces once every statement succeeded.
fn finish<T, E>(failure: Option<E>, value: T) -> Result<T, E> {
    match failure {
        Some(err) => Err(err),
        None => Ok(value),
    }
}
