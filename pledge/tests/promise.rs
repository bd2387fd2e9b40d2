mod common;

use common::{deferred, observe};
use pledge::task::run_until_idle;
use pledge::{Promise, Runtime, State};

use std::cell::Cell;
use std::rc::Rc;

#[pledge::test]
fn resolve_fulfills_with_value() {
    let promise = Promise::<i32, &str>::resolve(42);

    assert_eq!(promise.state(), State::Pending);
    assert_eq!(promise.peek(), None);

    run_until_idle();

    assert_eq!(promise.state(), State::Fulfilled);
    assert_eq!(promise.peek(), Some(Ok(42)));
}

#[pledge::test]
fn resolve_fulfills_exactly_once() {
    let hits = Rc::new(Cell::new(0));

    let h = hits.clone();
    let promise = Promise::<i32, &str>::resolve(1);
    promise.then(move |n| {
        h.set(h.get() + 1);
        Ok(n)
    });

    run_until_idle();
    run_until_idle();

    assert_eq!(hits.get(), 1);
    assert_eq!(promise.peek(), Some(Ok(1)));
}

#[pledge::test]
fn reject_rejects_with_reason() {
    let promise = Promise::<i32, &str>::reject("nope");
    observe(&promise);

    run_until_idle();

    assert_eq!(promise.state(), State::Rejected);
    assert_eq!(promise.peek(), Some(Err("nope")));
}

#[pledge::test]
fn initializer_runs_synchronously() {
    let ran = Rc::new(Cell::new(false));

    let r = ran.clone();
    let promise = Promise::<i32, &str>::new(move |resolver| {
        r.set(true);
        resolver.resolve(1);
        Ok(())
    });

    assert!(ran.get());
    assert!(promise.is_pending());
}

#[pledge::test]
fn initializer_error_becomes_rejection() {
    let promise = Promise::<i32, &str>::new(|_| Err("init failed"));
    observe(&promise);

    run_until_idle();

    assert_eq!(promise.peek(), Some(Err("init failed")));
}

#[pledge::test]
fn initializer_error_after_resolve_is_ignored() {
    let promise = Promise::<i32, &str>::new(|resolver| {
        resolver.resolve(1);
        Err("too late")
    });
    observe(&promise);

    run_until_idle();

    assert_eq!(promise.peek(), Some(Ok(1)));
}

#[pledge::test]
fn first_settlement_wins() {
    let (promise, resolver) = deferred::<i32, &str>();
    observe(&promise);

    resolver.resolve(1);
    resolver.reject("ignored");
    resolver.resolve(2);
    run_until_idle();

    assert_eq!(promise.peek(), Some(Ok(1)));

    resolver.resolve(3);
    run_until_idle();

    assert_eq!(promise.peek(), Some(Ok(1)));
}

#[pledge::test]
fn resolver_outlives_initializer() {
    let (promise, resolver) = deferred::<&str, &str>();

    run_until_idle();
    assert!(promise.is_pending());

    resolver.resolve("later");
    run_until_idle();

    assert_eq!(promise.peek(), Some(Ok("later")));
}

#[pledge::test]
fn adopt_takes_on_fulfillment() {
    let (inner, resolver) = deferred::<i32, &str>();
    let outer = Promise::adopt(inner.clone());

    run_until_idle();
    assert!(outer.is_pending());

    resolver.resolve(5);
    run_until_idle();

    assert_eq!(outer.peek(), Some(Ok(5)));
}

#[pledge::test]
fn adopt_takes_on_rejection() {
    let (inner, resolver) = deferred::<i32, &str>();
    let outer = Promise::adopt(inner);
    observe(&outer);

    run_until_idle();

    resolver.reject("inner");
    run_until_idle();

    assert_eq!(outer.peek(), Some(Err("inner")));
}

#[pledge::test]
fn adopt_flattens_multiple_levels() {
    let (innermost, resolver) = deferred::<i32, &str>();

    let middle = Promise::<i32, &str>::new(|r| {
        r.adopt(innermost.clone());
        Ok(())
    });
    let outer = Promise::adopt(middle.clone());

    run_until_idle();
    assert!(outer.is_pending());
    assert!(middle.is_pending());

    resolver.resolve(7);
    run_until_idle();

    assert_eq!(middle.peek(), Some(Ok(7)));
    assert_eq!(outer.peek(), Some(Ok(7)));
}

#[pledge::test]
fn adopt_follows_inner_that_later_adopts_pending_promise() {
    let (first, first_resolver) = deferred::<i32, &str>();
    let (second, second_resolver) = deferred::<i32, &str>();
    let outer = Promise::adopt(first);

    run_until_idle();

    first_resolver.adopt(second);
    run_until_idle();
    assert!(outer.is_pending());

    second_resolver.resolve(9);
    run_until_idle();

    assert_eq!(outer.peek(), Some(Ok(9)));
}

#[pledge::test]
fn adopt_of_settled_promise() {
    let inner = Promise::<i32, &str>::resolve(3);
    run_until_idle();

    let outer = Promise::adopt(inner);
    run_until_idle();

    assert_eq!(outer.peek(), Some(Ok(3)));
}

#[pledge::test]
fn deep_adoption_chain_settles() {
    let (root, resolver) = deferred::<u64, &str>();

    let mut current = root;
    for _ in 0..10_000 {
        current = Promise::adopt(current);
    }
    observe(&current);

    run_until_idle();
    assert!(current.is_pending());

    resolver.resolve(11);
    run_until_idle();

    assert_eq!(current.peek(), Some(Ok(11)));
}

#[pledge::test]
fn dropping_deep_pending_then_chain() {
    let (root, resolver) = deferred::<u64, &str>();

    let mut current = root;
    for _ in 0..100_000 {
        current = current.then(|n| Ok(n));
    }

    run_until_idle();
    assert!(current.is_pending());

    drop(current);
    drop(resolver);
}

#[pledge::test]
fn dropping_deep_pending_adoption_chain() {
    let (root, resolver) = deferred::<u64, &str>();

    let mut current = root;
    for _ in 0..100_000 {
        current = Promise::adopt(current);
    }

    run_until_idle();
    assert!(current.is_pending());

    drop(current);
    drop(resolver);
}

#[test]
fn settled_promise_can_be_inspected_after_block_on() {
    let runtime = Runtime::new();

    let promise = runtime.block_on(|| Promise::<String, &str>::resolve(String::from("done")));

    assert_eq!(promise.peek(), Some(Ok(String::from("done"))));
    assert!(runtime.is_idle());
}

#[test]
fn debug_renders_state() {
    let runtime = Runtime::new();

    let promise = runtime.block_on(|| {
        let (promise, _resolver) = deferred::<i32, &str>();
        promise
    });

    assert_eq!(format!("{promise:?}"), "Promise { state: Pending }");
}
