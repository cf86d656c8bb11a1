//! Per-statement result extraction.
//!
//! Extraction only ever sees rows of a statement that already succeeded, so
//! it cannot fail.

use crate::rows::RowSequence;

/// How a settled [`RowSequence`] turns into a statement's result.
pub trait Extraction<R>: Send + 'static {
    type Output: Send + 'static;

    fn extract(&self, rows: RowSequence<R>) -> Self::Output;
}

/// The full sequence, unchanged. Used for bulk reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Whole;

/// Row 0, or `None` when the statement produced no rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOrNone;

/// Rows are ignored; success is `()`. Used for writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl<R: Send + 'static> Extraction<R> for Whole {
    type Output = RowSequence<R>;

    fn extract(&self, rows: RowSequence<R>) -> RowSequence<R> {
        rows
    }
}

impl<R: Send + 'static> Extraction<R> for FirstOrNone {
    type Output = Option<R>;

    fn extract(&self, rows: RowSequence<R>) -> Option<R> {
        rows.into_iter().next()
    }
}

impl<R: Send + 'static> Extraction<R> for Discard {
    type Output = ();

    fn extract(&self, _rows: RowSequence<R>) {}
}
