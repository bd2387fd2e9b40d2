use super::core::Promise;
use super::resolver::{Resolution, Resolver};

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

impl<T, E> Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    /// Transforms the fulfilled value.
    ///
    /// Returns a new promise settled with whatever `on_fulfilled` returns:
    /// `Ok` fulfills it, `Err` rejects it, a promise is adopted. If this
    /// promise rejects, the new one rejects with the same reason.
    ///
    /// Registering a continuation counts as handling a rejection of this
    /// promise; the rejection is then carried by the returned promise.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let doubled = Promise::<i32, String>::resolve(21).then(|n| Ok(n * 2));
    /// ```
    pub fn then<U, F, R>(&self, on_fulfilled: F) -> Promise<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> R + 'static,
        R: Into<Resolution<U, E>>,
    {
        let (derived, resolver) = self.derive();
        let forward = resolver.clone();

        self.subscribe(
            move |value| resolver.settle(on_fulfilled(value)),
            move |reason| forward.reject(reason),
        );

        derived
    }

    /// Handles both outcomes.
    ///
    /// Exactly one of the handlers runs; its return value settles the
    /// returned promise the same way as for [`then`](Self::then).
    pub fn then_or_else<U, F, G, R, S>(&self, on_fulfilled: F, on_rejected: G) -> Promise<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> R + 'static,
        G: FnOnce(E) -> S + 'static,
        R: Into<Resolution<U, E>>,
        S: Into<Resolution<U, E>>,
    {
        let (derived, resolver) = self.derive();
        let recover = resolver.clone();

        self.subscribe(
            move |value| resolver.settle(on_fulfilled(value)),
            move |reason| recover.settle(on_rejected(reason)),
        );

        derived
    }

    /// Handles a rejection.
    ///
    /// A fulfilled value passes through unchanged; a reason is handed to
    /// `on_rejected`, whose return value settles the returned promise.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let recovered = failing.catch(|_| Ok(0));
    /// ```
    pub fn catch<F, R>(&self, on_rejected: F) -> Promise<T, E>
    where
        F: FnOnce(E) -> R + 'static,
        R: Into<Resolution<T, E>>,
    {
        let (derived, resolver) = self.derive();
        let recover = resolver.clone();

        self.subscribe(
            move |value| resolver.resolve(value),
            move |reason| recover.settle(on_rejected(reason)),
        );

        derived
    }

    /// Runs `on_settled` once the promise settles, whatever the outcome.
    ///
    /// The value or reason passes through untouched unless `on_settled`
    /// returns `Err`, in which case the returned promise rejects with that
    /// error instead.
    pub fn finally<F>(&self, on_settled: F) -> Promise<T, E>
    where
        F: FnOnce() -> Result<(), E> + 'static,
    {
        let on_settled = Rc::new(Cell::new(Some(on_settled)));
        let again = on_settled.clone();

        self.then_or_else(
            move |value| -> Resolution<T, E> {
                match run_once(&on_settled) {
                    Ok(()) => Resolution::Fulfill(value),
                    Err(err) => Resolution::Reject(err),
                }
            },
            move |reason| -> Resolution<T, E> {
                match run_once(&again) {
                    Ok(()) => Resolution::Reject(reason),
                    Err(err) => Resolution::Reject(err),
                }
            },
        )
    }

    /// Creates the pending promise a chaining call returns, on this
    /// promise's runtime.
    fn derive<U>(&self) -> (Promise<U, E>, Resolver<U, E>)
    where
        U: Clone + 'static,
    {
        let derived = Promise::pending_in(self.runtime.clone());
        let resolver = Resolver::new(derived.clone());

        (derived, resolver)
    }
}

fn run_once<F, E>(slot: &Cell<Option<F>>) -> Result<(), E>
where
    F: FnOnce() -> Result<(), E>,
{
    slot.take().map_or(Ok(()), |f| f())
}
