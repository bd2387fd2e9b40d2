use super::release::release;
use super::resolver::{Resolution, Resolver};
use super::state::{Slot, State};
use crate::error::UnhandledRejection;
use crate::runtime::RuntimeHandle;
use crate::runtime::context;

use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::mem;
use std::rc::Rc;

use tracing::{debug, trace};

type OnFulfilled<T> = Box<dyn FnOnce(T)>;
type OnRejected<E> = Box<dyn FnOnce(E)>;

/// Mutable state behind a [`Promise`] handle.
struct Shared<T, E>
where
    T: 'static,
    E: 'static,
{
    /// Current state and, once settled, the value or reason.
    slot: Slot<T, E>,

    /// Continuations awaiting fulfillment, in registration order.
    on_fulfilled: Vec<OnFulfilled<T>>,

    /// Continuations awaiting rejection, in registration order.
    on_rejected: Vec<OnRejected<E>>,
}

impl<T, E> Drop for Shared<T, E>
where
    T: 'static,
    E: 'static,
{
    fn drop(&mut self) {
        let on_fulfilled = mem::take(&mut self.on_fulfilled);
        let on_rejected = mem::take(&mut self.on_rejected);

        if on_fulfilled.is_empty() && on_rejected.is_empty() {
            return;
        }

        // Continuations own the rest of the chain.
        release(Box::new((on_fulfilled, on_rejected)));
    }
}

/// Continuations taken out of the shared state, ready to run once the
/// borrow is released.
enum Ready<T, E> {
    Fulfilled(T, Vec<OnFulfilled<T>>),
    Rejected(E, Vec<OnRejected<E>>),
}

/// A value that becomes available later.
///
/// A `Promise` is a cheap handle: cloning it yields another handle to the
/// same eventual value. It starts [`State::Pending`] and settles exactly once,
/// either fulfilled with a `T` or rejected with an `E`.
///
/// Nothing about a promise ever runs synchronously. Settlement requested
/// through a [`Resolver`] is deferred to the runtime's microtask queue, and
/// so is every continuation registered with [`then`](Self::then),
/// [`catch`](Self::catch) or [`finally`](Self::finally), even when the
/// promise has already settled.
///
/// Continuations receive clones of the settled value, hence the `Clone`
/// bounds. Share expensive payloads through `Rc`.
pub struct Promise<T, E>
where
    T: 'static,
    E: 'static,
{
    shared: Rc<RefCell<Shared<T, E>>>,

    /// Runtime receiving this promise's deferred work.
    pub(crate) runtime: RuntimeHandle,
}

impl<T, E> Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    /// Creates a promise and runs `initializer` synchronously.
    ///
    /// The initializer receives the promise's [`Resolver`]; it may settle the
    /// promise right away or stash the resolver and settle it later. If the
    /// initializer returns `Err`, the promise is rejected with that reason.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a running runtime.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let promise = Promise::<i32, String>::new(|resolver| {
    ///     resolver.resolve(42);
    ///     Ok(())
    /// });
    /// ```
    pub fn new<F>(initializer: F) -> Self
    where
        F: FnOnce(Resolver<T, E>) -> Result<(), E>,
    {
        let promise = Self::pending_in(context::current());
        let resolver = Resolver::new(promise.clone());

        if let Err(reason) = initializer(resolver.clone()) {
            resolver.reject(reason);
        }

        promise
    }

    /// Creates a promise that fulfills with `value`.
    pub fn resolve(value: T) -> Self {
        Self::new(|resolver| {
            resolver.resolve(value);
            Ok(())
        })
    }

    /// Creates a promise that takes on the eventual state of `inner`.
    ///
    /// The result never wraps `inner`; it fulfills or rejects exactly as
    /// `inner` does, following any further adoptions `inner` goes through.
    pub fn adopt(inner: Promise<T, E>) -> Self {
        Self::new(|resolver| {
            resolver.adopt(inner);
            Ok(())
        })
    }

    /// Creates a promise that rejects with `reason`.
    ///
    /// Like any rejection, it is reported as unhandled unless a failure
    /// continuation is registered before the queue is next drained. An
    /// unhandled rejection is never recorded, so the promise then stays
    /// pending.
    pub fn reject(reason: E) -> Self {
        Self::new(|resolver| {
            resolver.reject(reason);
            Ok(())
        })
    }

    /// Creates a pending promise scheduling onto `runtime`.
    pub(crate) fn pending_in(runtime: RuntimeHandle) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                slot: Slot::Pending,
                on_fulfilled: Vec::new(),
                on_rejected: Vec::new(),
            })),
            runtime,
        }
    }

    /// Returns a clone of the settled value or reason, or `None` while
    /// pending.
    ///
    /// Peeking does not count as handling a rejection.
    pub fn peek(&self) -> Option<Result<T, E>> {
        match &self.shared.borrow().slot {
            Slot::Pending => None,
            Slot::Fulfilled(value) => Some(Ok(value.clone())),
            Slot::Rejected(reason) => Some(Err(reason.clone())),
        }
    }

    /// Registers a pair of continuations, exactly one of which will run.
    ///
    /// If the promise has already settled, a drain is scheduled; the
    /// continuation never runs inside this call.
    pub(crate) fn subscribe<F, G>(&self, on_fulfilled: F, on_rejected: G)
    where
        F: FnOnce(T) + 'static,
        G: FnOnce(E) + 'static,
    {
        let settled = {
            let mut shared = self.shared.borrow_mut();
            shared.on_fulfilled.push(Box::new(on_fulfilled));
            shared.on_rejected.push(Box::new(on_rejected));
            !shared.slot.is_pending()
        };

        if settled {
            let this = self.clone();
            self.runtime.schedule(move || this.drain());
        }
    }

    /// Settlement check. Only ever runs from a queued task.
    pub(crate) fn settle_now(&self, resolution: Resolution<T, E>) {
        if !self.shared.borrow().slot.is_pending() {
            return;
        }

        match resolution {
            Resolution::Adopt(inner) => {
                debug!(inner = ?inner.state(), "adopting inner promise");

                let on_value = Resolver::new(self.clone());
                let on_reason = on_value.clone();
                inner.subscribe(
                    move |value| on_value.resolve(value),
                    move |reason| on_reason.reject(reason),
                );
            }
            Resolution::Fulfill(value) => {
                self.shared.borrow_mut().slot = Slot::Fulfilled(value);
                self.drain();
            }
            Resolution::Reject(reason) => {
                if self.shared.borrow().on_rejected.is_empty() {
                    // Reported instead of stored: the promise stays pending.
                    self.runtime.report(UnhandledRejection::new(reason));
                    return;
                }

                self.shared.borrow_mut().slot = Slot::Rejected(reason);
                self.drain();
            }
        }
    }

    /// Runs every continuation registered for the settled outcome, in
    /// registration order, and discards the others.
    fn drain(&self) {
        let (ready, discarded_fulfilled, discarded_rejected) = {
            let mut guard = self.shared.borrow_mut();
            let shared = &mut *guard;

            match &shared.slot {
                Slot::Pending => return,
                Slot::Fulfilled(value) => (
                    Ready::Fulfilled(value.clone(), mem::take(&mut shared.on_fulfilled)),
                    Vec::new(),
                    mem::take(&mut shared.on_rejected),
                ),
                Slot::Rejected(reason) => (
                    Ready::Rejected(reason.clone(), mem::take(&mut shared.on_rejected)),
                    mem::take(&mut shared.on_fulfilled),
                    Vec::new(),
                ),
            }
        };

        drop(discarded_fulfilled);
        drop(discarded_rejected);

        match ready {
            Ready::Fulfilled(value, continuations) => {
                trace!(
                    state = %State::Fulfilled,
                    continuations = continuations.len(),
                    "draining continuations"
                );
                for continuation in continuations {
                    continuation(value.clone());
                }
            }
            Ready::Rejected(reason, continuations) => {
                trace!(
                    state = %State::Rejected,
                    continuations = continuations.len(),
                    "draining continuations"
                );
                for continuation in continuations {
                    continuation(reason.clone());
                }
            }
        }
    }
}

impl<T, E> Promise<T, E>
where
    T: 'static,
    E: 'static,
{
    /// Returns the current state.
    pub fn state(&self) -> State {
        self.shared.borrow().slot.state()
    }

    /// Returns `true` until the promise settles.
    pub fn is_pending(&self) -> bool {
        self.shared.borrow().slot.is_pending()
    }
}

impl<T, E> Clone for Promise<T, E>
where
    T: 'static,
    E: 'static,
{
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T, E> Debug for Promise<T, E>
where
    T: 'static,
    E: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("state", &self.state())
            .finish()
    }
}
