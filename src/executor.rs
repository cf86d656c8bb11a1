//! Statement dispatch and the callback-to-future bridge.
//!
//! [`prepare`] splits one statement into a [`Dispatch`], which travels into
//! the transaction body, and a [`Pending`], which the caller awaits. The two
//! are joined by a one-shot channel that the engine's callback fills.

use futures::channel::oneshot;

use crate::engine::TransactionContext;
use crate::extract::Extraction;
use crate::rows::RowSequence;
use crate::statement::ParameterizedStatement;

type Outcome<R, E> = Result<RowSequence<R>, E>;

/// A statement ready to be handed to a transaction. Consumed on dispatch.
pub struct Dispatch<R, E> {
    statement: ParameterizedStatement,
    completion: oneshot::Sender<Outcome<R, E>>,
}

/// The not-yet-settled result of a dispatched statement.
pub struct Pending<R, E, X> {
    receiver: oneshot::Receiver<Outcome<R, E>>,
    extraction: X,
}

pub fn prepare<R, E, X>(
    statement: ParameterizedStatement,
    extraction: X,
) -> (Dispatch<R, E>, Pending<R, E, X>)
where
    X: Extraction<R>,
{
    let (completion, receiver) = oneshot::channel();
    (
        Dispatch {
            statement,
            completion,
        },
        Pending {
            receiver,
            extraction,
        },
    )
}

impl<R, E> Dispatch<R, E>
where
    R: Send + 'static,
    E: Send + 'static,
{
    pub fn statement(&self) -> &ParameterizedStatement {
        &self.statement
    }

    pub fn dispatch(self, ctx: &mut dyn TransactionContext<R, E>) {
        let completion = self.completion;
        ctx.execute_statement(
            &self.statement,
            Box::new(move |outcome| {
                // Receiver gone means the caller stopped listening; the
                // transaction still owns the statement's effects.
                let _ = completion.send(outcome);
            }),
        );
    }
}

impl<R, E, X> Pending<R, E, X>
where
    X: Extraction<R>,
{
    /// Wait for the engine to settle the statement and apply the extraction.
    ///
    /// Returns `None` if the callback was dropped unsettled, which happens
    /// when the engine fails the transaction before dispatching into it.
    pub async fn settle(self) -> Option<Result<X::Output, E>> {
        match self.receiver.await {
            Ok(Ok(rows)) => Some(Ok(self.extraction.extract(rows))),
            Ok(Err(err)) => Some(Err(err)),
            Err(oneshot::Canceled) => None,
        }
    }
}
