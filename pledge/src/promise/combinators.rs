//! Combinators aggregating many promises into one.
//!
//! Every combinator registers a continuation pair on each input, so input
//! rejections are always observed and never reported as unhandled. Inputs
//! are consumed in iteration order and results are index-aligned with it,
//! whatever order the inputs settle in.

use super::core::Promise;
use super::state::State;
use crate::error::AggregateError;

use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

/// Outcome of one input of [`Promise::all_settled`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Settled<T, E> {
    /// The input fulfilled with `value`.
    Fulfilled { value: T },

    /// The input rejected with `reason`.
    Rejected { reason: E },
}

impl<T, E> Settled<T, E> {
    /// Returns [`State::Fulfilled`] or [`State::Rejected`].
    pub fn status(&self) -> State {
        match self {
            Settled::Fulfilled { .. } => State::Fulfilled,
            Settled::Rejected { .. } => State::Rejected,
        }
    }

    /// Converts the outcome into `Ok(value)` or `Err(reason)`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Settled::Fulfilled { value } => Ok(value),
            Settled::Rejected { reason } => Err(reason),
        }
    }
}

/// Index-aligned result slots shared by the continuations of one
/// combinator call.
struct Slots<V> {
    values: RefCell<Vec<Option<V>>>,
    filled: Cell<usize>,
}

impl<V> Slots<V> {
    fn new(len: usize) -> Rc<Self> {
        Rc::new(Self {
            values: RefCell::new((0..len).map(|_| None).collect()),
            filled: Cell::new(0),
        })
    }

    /// Stores `value` at `index`. Returns every value, in index order, once
    /// the last slot is filled.
    fn fill(&self, index: usize, value: V) -> Option<Vec<V>> {
        let mut values = self.values.borrow_mut();
        values[index] = Some(value);
        self.filled.set(self.filled.get() + 1);

        if self.filled.get() < values.len() {
            return None;
        }

        Some(values.drain(..).flatten().collect())
    }
}

impl<T, E> Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    /// Fulfills with every input's value once all inputs fulfill.
    ///
    /// Rejects with the first rejection observed; the other outcomes are
    /// ignored. An empty input fulfills with an empty `Vec`.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a running runtime.
    pub fn all<I>(promises: I) -> Promise<Vec<T>, E>
    where
        I: IntoIterator<Item = Promise<T, E>>,
    {
        let promises: Vec<_> = promises.into_iter().collect();

        Promise::new(move |resolver| {
            if promises.is_empty() {
                resolver.resolve(Vec::new());
                return Ok(());
            }

            let slots = Slots::new(promises.len());

            for (index, promise) in promises.iter().enumerate() {
                let slots = slots.clone();
                let on_value = resolver.clone();
                let on_reason = resolver.clone();

                promise.subscribe(
                    move |value| {
                        if let Some(values) = slots.fill(index, value) {
                            on_value.resolve(values);
                        }
                    },
                    move |reason| on_reason.reject(reason),
                );
            }

            Ok(())
        })
    }

    /// Fulfills with every input's outcome once all inputs settle.
    ///
    /// Never rejects. An empty input fulfills with an empty `Vec`.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a running runtime.
    pub fn all_settled<I>(promises: I) -> Promise<Vec<Settled<T, E>>, E>
    where
        I: IntoIterator<Item = Promise<T, E>>,
    {
        let promises: Vec<_> = promises.into_iter().collect();

        Promise::new(move |resolver| {
            if promises.is_empty() {
                resolver.resolve(Vec::new());
                return Ok(());
            }

            let slots = Slots::new(promises.len());

            for (index, promise) in promises.iter().enumerate() {
                let fulfilled = slots.clone();
                let rejected = slots.clone();
                let on_value = resolver.clone();
                let on_reason = resolver.clone();

                promise.subscribe(
                    move |value| {
                        let outcome = Settled::Fulfilled { value };
                        if let Some(outcomes) = fulfilled.fill(index, outcome) {
                            on_value.resolve(outcomes);
                        }
                    },
                    move |reason| {
                        let outcome = Settled::Rejected { reason };
                        if let Some(outcomes) = rejected.fill(index, outcome) {
                            on_reason.resolve(outcomes);
                        }
                    },
                );
            }

            Ok(())
        })
    }

    /// Settles like whichever input settles first.
    ///
    /// "First" is chronological, not positional. An empty input never
    /// settles.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a running runtime.
    pub fn race<I>(promises: I) -> Promise<T, E>
    where
        I: IntoIterator<Item = Promise<T, E>>,
    {
        let promises: Vec<_> = promises.into_iter().collect();

        Promise::new(move |resolver| {
            for promise in &promises {
                let on_value = resolver.clone();
                let on_reason = resolver.clone();

                promise.subscribe(
                    move |value| on_value.resolve(value),
                    move |reason| on_reason.reject(reason),
                );
            }

            Ok(())
        })
    }

    /// Fulfills with the first input to fulfill.
    ///
    /// Rejects with an [`AggregateError`] holding every reason, in input
    /// order, only once all inputs have rejected. An empty input never
    /// settles.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a running runtime.
    pub fn any<I>(promises: I) -> Promise<T, AggregateError<E>>
    where
        I: IntoIterator<Item = Promise<T, E>>,
    {
        let promises: Vec<_> = promises.into_iter().collect();

        Promise::new(move |resolver| {
            let slots = Slots::new(promises.len());

            for (index, promise) in promises.iter().enumerate() {
                let slots = slots.clone();
                let on_value = resolver.clone();
                let on_reason = resolver.clone();

                promise.subscribe(
                    move |value| on_value.resolve(value),
                    move |reason| {
                        if let Some(reasons) = slots.fill(index, reason) {
                            on_reason.reject(AggregateError { reasons });
                        }
                    },
                );
            }

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_complete_in_index_order() {
        let slots = Slots::new(3);

        assert_eq!(slots.fill(2, "c"), None);
        assert_eq!(slots.fill(0, "a"), None);
        assert_eq!(slots.fill(1, "b"), Some(vec!["a", "b", "c"]));
    }

    #[test]
    fn settled_status() {
        let ok: Settled<i32, &str> = Settled::Fulfilled { value: 1 };
        let err: Settled<i32, &str> = Settled::Rejected { reason: "e" };

        assert_eq!(ok.status(), State::Fulfilled);
        assert_eq!(err.status().to_string(), "rejected");
        assert_eq!(err.into_result(), Err("e"));
    }
}
