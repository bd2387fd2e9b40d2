#![allow(dead_code)]

use pledge::{Promise, Resolver};

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per test binary.
///
/// Filtered by `RUST_LOG`, e.g. `RUST_LOG=pledge=trace`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Registers a no-op continuation pair so a rejection of `promise` counts
/// as handled. Read the outcome back with `peek()`.
pub fn observe<T, E>(promise: &Promise<T, E>)
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    promise.then_or_else(|_| Ok::<(), E>(()), |_| Ok::<(), E>(()));
}

/// Creates a pending promise whose resolver is handed back for settling it
/// later from the test body.
pub fn deferred<T, E>() -> (Promise<T, E>, Resolver<T, E>)
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    let stash = Rc::new(RefCell::new(None));
    let slot = stash.clone();

    let promise = Promise::<T, E>::new(move |resolver| {
        *slot.borrow_mut() = Some(resolver);
        Ok(())
    });

    let resolver = stash
        .borrow_mut()
        .take()
        .expect("initializer runs synchronously");

    (promise, resolver)
}
