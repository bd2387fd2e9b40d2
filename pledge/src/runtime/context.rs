use super::core::RuntimeHandle;

use std::cell::RefCell;

thread_local! {
    /// Thread-local handle to the runtime currently being driven.
    ///
    /// Set while inside [`Runtime::block_on`](crate::Runtime::block_on) or
    /// [`Runtime::run_until_idle`](crate::Runtime::run_until_idle), so that
    /// promises constructed there pick up the right scheduler without
    /// explicit parameter passing.
    pub(crate) static CURRENT_RUNTIME: RefCell<Option<RuntimeHandle>> =
        const { RefCell::new(None) };
}

/// Restores the previously installed runtime when dropped, including when
/// the closure passed to [`enter_context`] unwinds.
struct ContextGuard {
    prev: Option<RuntimeHandle>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let prev = self.prev.take();
        CURRENT_RUNTIME.with(|cell| {
            cell.replace(prev);
        });
    }
}

/// Enters the runtime context for the current thread.
///
/// The handle is installed for the duration of `f`; the previous context is
/// restored afterwards. Contexts nest.
pub(crate) fn enter_context<R>(handle: RuntimeHandle, f: impl FnOnce() -> R) -> R {
    let prev = CURRENT_RUNTIME.with(|cell| cell.replace(Some(handle)));
    let _guard = ContextGuard { prev };

    f()
}

/// Returns the handle of the runtime currently being driven, if any.
pub(crate) fn try_current() -> Option<RuntimeHandle> {
    CURRENT_RUNTIME.with(|cell| cell.borrow().clone())
}

/// Returns the handle of the runtime currently being driven.
///
/// # Panics
///
/// Panics if called outside of a runtime context.
pub(crate) fn current() -> RuntimeHandle {
    try_current().expect("promise machinery used outside of a runtime context")
}
