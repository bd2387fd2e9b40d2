//! Error types surfaced by the promise machinery.
//!
//! Ordinary rejections are not errors in this sense: they travel through the
//! `E` channel of a [`Promise`](crate::Promise). The types here cover the two
//! diagnostics the machinery itself produces:
//!
//! - [`UnhandledRejection`] — a promise rejected while nothing was listening.
//! - [`AggregateError`] — every input of [`Promise::any`](crate::Promise::any)
//!   rejected.

use std::any::Any;
use std::fmt::Debug;

use thiserror::Error;

/// Raised when a promise would reject with no failure continuation
/// registered.
///
/// The signal is not delivered through any promise chain. It is handed to
/// the runtime's unhandled-rejection hook (see
/// [`RuntimeBuilder::on_unhandled_rejection`]) from inside the settlement
/// task that found no handler. The reason is not recorded on the promise,
/// which stays pending.
///
/// [`RuntimeBuilder::on_unhandled_rejection`]: crate::RuntimeBuilder::on_unhandled_rejection
#[derive(Debug, Error)]
#[error("(in promise) {rendered}")]
pub struct UnhandledRejection {
    /// `Debug` rendering of the rejection reason.
    rendered: String,

    /// The original reason, type-erased.
    reason: Box<dyn Any>,
}

impl UnhandledRejection {
    pub(crate) fn new<E>(reason: E) -> Self
    where
        E: Debug + 'static,
    {
        Self {
            rendered: format!("{reason:?}"),
            reason: Box::new(reason),
        }
    }

    /// Returns the `Debug` rendering of the rejection reason.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Returns the original rejection reason if it has type `E`.
    pub fn reason<E: 'static>(&self) -> Option<&E> {
        self.reason.downcast_ref()
    }
}

/// Rejection reason of [`Promise::any`](crate::Promise::any) when every
/// input rejected.
///
/// `reasons` is index-aligned with the inputs, regardless of the order in
/// which they rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("All promises were rejected")]
pub struct AggregateError<E> {
    pub reasons: Vec<E>,
}
