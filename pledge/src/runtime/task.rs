//! Microtask primitives bound to the current runtime.
//!
//! These are the free-function counterparts of [`Runtime::spawn`] and
//! [`Runtime::run_until_idle`], resolving the runtime from the thread-local
//! context instead of taking it as a parameter.
//!
//! [`Runtime::spawn`]: crate::Runtime::spawn
//! [`Runtime::run_until_idle`]: crate::Runtime::run_until_idle

use super::context;

/// Queues a microtask on the current runtime.
///
/// # Panics
///
/// Panics if called outside the context of a running runtime.
///
/// # Example
///
/// ```rust,ignore
/// runtime.block_on(|| {
///     task::spawn(|| println!("runs after the closure returns"));
/// });
/// ```
pub fn spawn<F>(task: F)
where
    F: FnOnce() + 'static,
{
    context::current().schedule(task);
}

/// Drains the current runtime's queue until idle.
///
/// Useful inside [`Runtime::block_on`](crate::Runtime::block_on) to observe
/// settled promises before the closure returns. Returns the number of tasks
/// run.
///
/// # Panics
///
/// Panics if called outside the context of a running runtime.
pub fn run_until_idle() -> usize {
    context::current().run_until_idle()
}
