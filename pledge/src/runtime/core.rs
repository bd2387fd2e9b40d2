use super::builder::RuntimeBuilder;
use super::context::enter_context;
use super::queue::Schedule;
use crate::error::UnhandledRejection;

use std::rc::Rc;

use tracing::{error, trace};

/// Callback invoked with every unhandled rejection.
pub(crate) type RejectionHook = Rc<dyn Fn(&UnhandledRejection)>;

/// Shared handle to a runtime's scheduler and hook.
///
/// Every promise keeps one of these so that its deferred work always lands
/// on the queue of the runtime it was created in.
pub(crate) type RuntimeHandle = Rc<Handle>;

/// State shared between a [`Runtime`] and the promises created inside it.
pub(crate) struct Handle {
    /// FIFO queue receiving every deferred settlement and drain.
    scheduler: Box<dyn Schedule>,

    /// Receives unhandled rejections. `None` means log and panic.
    hook: Option<RejectionHook>,
}

impl Handle {
    /// Defers `task` until the current synchronous execution completes.
    pub(crate) fn schedule(&self, task: impl FnOnce() + 'static) {
        self.scheduler.push(Box::new(task));
    }

    /// Pops and runs queued tasks until the queue is idle.
    ///
    /// Tasks queued by running tasks are executed in the same pass.
    /// Returns the number of tasks run.
    pub(crate) fn run_until_idle(&self) -> usize {
        let mut ran = 0;

        while let Some(task) = self.scheduler.pop() {
            task();
            ran += 1;
        }

        trace!(ran, "microtask queue idle");
        ran
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.scheduler.is_empty()
    }

    /// Surfaces an unhandled rejection outside of any promise chain.
    pub(crate) fn report(&self, rejection: UnhandledRejection) {
        error!(reason = rejection.rendered(), "unhandled promise rejection");

        match &self.hook {
            Some(hook) => hook(&rejection),
            None => panic!("{rejection}"),
        }
    }
}

/// The runtime driving promise settlement.
///
/// `Runtime` is responsible for:
/// - owning the deferred-task queue all promises created inside it use,
/// - providing the synchronous entry point via [`block_on`](Self::block_on),
/// - draining queued microtasks in FIFO order,
/// - routing unhandled rejections to the configured hook.
///
/// The runtime is single-threaded: it runs on the thread that calls
/// [`block_on`](Self::block_on) and never spawns threads.
pub struct Runtime {
    handle: RuntimeHandle,
}

impl Runtime {
    /// Creates a runtime with the default configuration.
    ///
    /// Equivalent to `RuntimeBuilder::new().build()`.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub(crate) fn from_parts(scheduler: Box<dyn Schedule>, hook: Option<RejectionHook>) -> Self {
        Self {
            handle: Rc::new(Handle { scheduler, hook }),
        }
    }

    /// Runs `f` inside the runtime context, then drains the queue.
    ///
    /// Promises constructed in `f` (and in every microtask it leads to)
    /// schedule onto this runtime. The queue is drained until idle before
    /// `f`'s output is returned, so every promise that can settle has
    /// settled by then.
    ///
    /// # Panics
    ///
    /// Panics if a rejection goes unhandled and no hook was configured.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let runtime = Runtime::new();
    /// let promise = runtime.block_on(|| Promise::<i32, String>::resolve(42));
    /// assert_eq!(promise.peek(), Some(Ok(42)));
    /// ```
    pub fn block_on<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        enter_context(self.handle.clone(), || {
            let out = f();
            self.handle.run_until_idle();
            out
        })
    }

    /// Queues a microtask on this runtime.
    ///
    /// The task runs on the next drain, after every task already queued.
    pub fn spawn<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.handle.schedule(task);
    }

    /// Drains the queue until idle and returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        enter_context(self.handle.clone(), || self.handle.run_until_idle())
    }

    /// Returns `true` if no microtask is waiting to run.
    pub fn is_idle(&self) -> bool {
        self.handle.is_idle()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::context::try_current;

    use std::cell::RefCell;

    #[test]
    fn block_on_drains_spawned_tasks() {
        let runtime = Runtime::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = order.clone();
        let out = runtime.block_on(move || {
            let first = o.clone();
            crate::task::spawn(move || first.borrow_mut().push("first"));
            o.borrow_mut().push("sync");
            7
        });

        order.borrow_mut().push("after");

        assert_eq!(out, 7);
        assert_eq!(*order.borrow(), vec!["sync", "first", "after"]);
        assert!(runtime.is_idle());
    }

    #[test]
    fn spawn_outside_block_on_waits_for_drain() {
        let runtime = Runtime::new();
        let hits = Rc::new(RefCell::new(0));

        let h = hits.clone();
        runtime.spawn(move || *h.borrow_mut() += 1);

        assert!(!runtime.is_idle());
        assert_eq!(*hits.borrow(), 0);

        assert_eq!(runtime.run_until_idle(), 1);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn context_is_restored_after_block_on() {
        let runtime = Runtime::new();

        assert!(try_current().is_none());
        runtime.block_on(|| assert!(try_current().is_some()));
        assert!(try_current().is_none());
    }
}
