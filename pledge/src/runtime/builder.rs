use super::Runtime;
use super::core::RejectionHook;
use super::queue::{MicrotaskQueue, Schedule};
use crate::error::UnhandledRejection;

use std::rc::Rc;

/// Builder for configuring and creating a runtime.
///
/// `RuntimeBuilder` allows customizing runtime parameters before
/// constructing the runtime. It currently supports replacing the
/// deferred-task queue and installing an unhandled-rejection hook.
///
/// # Examples
///
/// ```rust,ignore
/// let runtime = RuntimeBuilder::new()
///     .on_unhandled_rejection(|err| eprintln!("{err}"))
///     .build();
/// ```
pub struct RuntimeBuilder {
    /// Queue receiving deferred work.
    scheduler: Box<dyn Schedule>,

    /// Unhandled-rejection hook, if any.
    hook: Option<RejectionHook>,
}

impl RuntimeBuilder {
    /// Creates a new `RuntimeBuilder` with default configuration.
    ///
    /// By default, the runtime uses a fresh [`MicrotaskQueue`] and treats
    /// unhandled rejections as fatal: they are logged and the draining
    /// thread panics.
    pub fn new() -> Self {
        Self {
            scheduler: Box::new(MicrotaskQueue::new()),
            hook: None,
        }
    }

    /// Replaces the deferred-task queue.
    ///
    /// The queue must pop tasks in the order they were pushed.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let builder = RuntimeBuilder::new()
    ///     .scheduler(MicrotaskQueue::new());
    /// ```
    pub fn scheduler<S>(mut self, scheduler: S) -> Self
    where
        S: Schedule + 'static,
    {
        self.scheduler = Box::new(scheduler);
        self
    }

    /// Installs a hook receiving every unhandled rejection.
    ///
    /// The hook replaces the default log-and-panic behaviour. It runs inside
    /// the settlement task that found no failure continuation; it is never
    /// observable from a promise chain.
    pub fn on_unhandled_rejection<F>(mut self, hook: F) -> Self
    where
        F: Fn(&UnhandledRejection) + 'static,
    {
        self.hook = Some(Rc::new(hook));
        self
    }

    /// Builds the runtime with the configured options.
    pub fn build(self) -> Runtime {
        Runtime::from_parts(self.scheduler, self.hook)
    }
}

impl Default for RuntimeBuilder {
    /// Creates a default `RuntimeBuilder`.
    fn default() -> Self {
        Self::new()
    }
}
