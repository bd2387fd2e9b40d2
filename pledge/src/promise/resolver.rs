use super::core::Promise;

use std::fmt::Debug;

/// What a promise can be settled with.
///
/// Continuation handlers return anything convertible into a `Resolution`:
/// a `Result` fulfills on `Ok` and rejects on `Err`, and a `Promise` is
/// adopted.
///
/// # Examples
///
/// ```rust,ignore
/// promise.then(|n| Ok(n + 1));                        // Fulfill
/// promise.then(|_| Err(String::from("nope")));         // Reject
/// promise.then(|n| Promise::resolve(n * 2));           // Adopt
/// ```
#[derive(Debug)]
pub enum Resolution<T, E>
where
    T: 'static,
    E: 'static,
{
    /// Fulfill with a value.
    Fulfill(T),

    /// Reject with a reason.
    Reject(E),

    /// Take on the eventual state of another promise.
    Adopt(Promise<T, E>),
}

impl<T, E> From<Result<T, E>> for Resolution<T, E>
where
    T: 'static,
    E: 'static,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Resolution::Fulfill(value),
            Err(reason) => Resolution::Reject(reason),
        }
    }
}

impl<T, E> From<Promise<T, E>> for Resolution<T, E>
where
    T: 'static,
    E: 'static,
{
    fn from(promise: Promise<T, E>) -> Self {
        Resolution::Adopt(promise)
    }
}

/// The resolve/reject entry points of one promise.
///
/// A `Resolver` is handed to the initializer of [`Promise::new`]. Every
/// method only *requests* settlement: the actual check runs later, from the
/// runtime's microtask queue. Once the promise has settled, further requests
/// are ignored.
///
/// Resolvers are cheap to clone; all clones target the same promise.
pub struct Resolver<T, E>
where
    T: 'static,
    E: 'static,
{
    promise: Promise<T, E>,
}

impl<T, E> Resolver<T, E>
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    pub(crate) fn new(promise: Promise<T, E>) -> Self {
        Self { promise }
    }

    /// Requests fulfillment with `value`.
    pub fn resolve(&self, value: T) {
        self.settle(Resolution::Fulfill(value));
    }

    /// Requests rejection with `reason`.
    pub fn reject(&self, reason: E) {
        self.settle(Resolution::Reject(reason));
    }

    /// Requests that the promise take on the eventual state of `inner`.
    ///
    /// Adoption does not lock the promise: a plain resolve or reject that
    /// runs before `inner` settles still wins.
    pub fn adopt(&self, inner: Promise<T, E>) {
        self.settle(Resolution::Adopt(inner));
    }

    /// Requests settlement with any [`Resolution`].
    pub fn settle(&self, resolution: impl Into<Resolution<T, E>>) {
        let resolution = resolution.into();
        let promise = self.promise.clone();

        self.promise
            .runtime
            .schedule(move || promise.settle_now(resolution));
    }
}

impl<T, E> Clone for Resolver<T, E>
where
    T: 'static,
    E: 'static,
{
    fn clone(&self) -> Self {
        Self {
            promise: self.promise.clone(),
        }
    }
}
