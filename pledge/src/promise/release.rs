//! Deferred release of continuation lists.
//!
//! An unsettled chain is a linked list: each promise owns continuations that
//! own the resolver of the next promise. Dropping the head would free the
//! whole chain recursively. Instead, continuation lists are parked on a
//! thread-local work list and freed one at a time by the outermost release.

use std::any::Any;
use std::cell::{Cell, RefCell};

thread_local! {
    /// Continuation lists waiting to be dropped.
    static PARKED: RefCell<Vec<Box<dyn Any>>> = const { RefCell::new(Vec::new()) };

    /// Set while a release loop is running further up the stack.
    static RELEASING: Cell<bool> = const { Cell::new(false) };
}

/// Clears [`RELEASING`] when the release loop ends, including by unwinding.
struct ReleaseGuard;

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        let _ = RELEASING.try_with(|releasing| releasing.set(false));
    }
}

/// Drops `item` without growing the stack with the depth of what it owns.
///
/// Nested calls made while `item` is being dropped only park their item; the
/// outermost call keeps popping until the work list is empty. During thread
/// teardown the item is dropped in place.
pub(crate) fn release(item: Box<dyn Any>) {
    if PARKED
        .try_with(|parked| parked.borrow_mut().push(item))
        .is_err()
    {
        return;
    }

    if RELEASING
        .try_with(|releasing| releasing.replace(true))
        .unwrap_or(true)
    {
        return;
    }

    let _guard = ReleaseGuard;

    while let Some(item) = PARKED
        .try_with(|parked| parked.borrow_mut().pop())
        .ok()
        .flatten()
    {
        drop(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    /// Owns the next link; records its depth when dropped.
    struct Link {
        next: Option<Box<Link>>,
        depth: usize,
        dropped: Rc<RefCell<Vec<usize>>>,
    }

    impl Drop for Link {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.depth);
            if let Some(next) = self.next.take() {
                release(next);
            }
        }
    }

    #[test]
    fn nested_releases_run_iteratively() {
        let dropped = Rc::new(RefCell::new(Vec::new()));

        let mut head = None;
        for depth in (0..3).rev() {
            head = Some(Box::new(Link {
                next: head,
                depth,
                dropped: dropped.clone(),
            }));
        }

        if let Some(head) = head {
            release(head);
        }

        assert_eq!(*dropped.borrow(), vec![0, 1, 2]);
        assert!(!RELEASING.with(Cell::get));
        assert!(PARKED.with(|parked| parked.borrow().is_empty()));
    }
}
