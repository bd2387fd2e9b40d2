use std::cell::RefCell;
use std::collections::VecDeque;

/// A deferred unit of work.
///
/// Microtasks take no arguments and return nothing; everything they need is
/// captured by the closure.
pub type Microtask = Box<dyn FnOnce()>;

/// The deferred-task scheduling seam.
///
/// The runtime never executes promise continuations inline. Every settlement
/// check and every continuation drain is pushed onto a `Schedule`
/// implementation and later popped by [`Runtime::run_until_idle`].
///
/// Implementations must behave as a FIFO queue: tasks are popped in the
/// order they were pushed. Cross-promise ordering guarantees depend on it.
///
/// Both methods take `&self` because tasks are pushed while other tasks are
/// running; implementations use interior mutability and must not hold a
/// borrow across calls.
///
/// [`Runtime::run_until_idle`]: crate::Runtime::run_until_idle
pub trait Schedule {
    /// Appends a task to the back of the queue.
    fn push(&self, task: Microtask);

    /// Removes the task at the front of the queue.
    ///
    /// Returns `None` once the queue is idle.
    fn pop(&self) -> Option<Microtask>;

    /// Returns the number of queued tasks.
    fn len(&self) -> usize;

    /// Returns `true` if no task is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The default FIFO microtask queue.
///
/// A plain `VecDeque` behind a `RefCell`: the runtime is single-threaded, so
/// no locking is involved.
pub struct MicrotaskQueue {
    queue: RefCell<VecDeque<Microtask>>,
}

impl MicrotaskQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
        }
    }
}

impl Default for MicrotaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule for MicrotaskQueue {
    fn push(&self, task: Microtask) {
        self.queue.borrow_mut().push_back(task);
    }

    fn pop(&self) -> Option<Microtask> {
        self.queue.borrow_mut().pop_front()
    }

    fn len(&self) -> usize {
        self.queue.borrow().len()
    }
}
