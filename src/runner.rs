use crate::engine::{Engine, TransactionMode};
use crate::executor::Dispatch;

/// Opens exactly one native transaction per call and dispatches statements
/// into it in the order given.
pub struct TransactionRunner<'e, E> {
    engine: &'e E,
}

impl<'e, E: Engine> TransactionRunner<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    pub async fn run(
        &self,
        mode: TransactionMode,
        dispatches: Vec<Dispatch<E::Row, E::Error>>,
    ) -> Result<(), E::Error> {
        log::debug!(
            "opening {:?} transaction for {} statement(s)",
            mode,
            dispatches.len()
        );
        self.engine
            .transaction(mode, move |ctx| {
                for dispatch in dispatches {
                    dispatch.dispatch(ctx);
                }
            })
            .await
    }

    pub async fn read_only(
        &self,
        dispatches: Vec<Dispatch<E::Row, E::Error>>,
    ) -> Result<(), E::Error> {
        self.run(TransactionMode::ReadOnly, dispatches).await
    }

    pub async fn read_write(
        &self,
        dispatches: Vec<Dispatch<E::Row, E::Error>>,
    ) -> Result<(), E::Error> {
        self.run(TransactionMode::ReadWrite, dispatches).await
    }
}
