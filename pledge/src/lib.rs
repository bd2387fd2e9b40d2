//! # Pledge
//!
//! **Pledge** is a single-threaded promise primitive for Rust, built as the
//! deferred-value layer of the **Nebula** ecosystem.
//!
//! A [`Promise`] stands in for a value that becomes available later. It
//! settles exactly once, and every reaction to that settlement runs from a
//! FIFO microtask queue after the current synchronous execution completes,
//! never inline.
//!
//! Pledge offers:
//!
//! - **Deferred settlement** through a [`Resolver`] handed to the initializer
//! - **Chaining** with [`then`](Promise::then), [`catch`](Promise::catch)
//!   and [`finally`](Promise::finally), with automatic flattening of
//!   promise-returning handlers
//! - **Combinators** [`all`](Promise::all), [`all_settled`](Promise::all_settled),
//!   [`race`](Promise::race) and [`any`](Promise::any)
//! - **Unhandled-rejection reporting** through a runtime hook
//! - A pluggable [`Schedule`] seam for the microtask queue
//!
//! There is no parallelism, cancellation or timeout: promises model
//! asynchronous sequencing on one thread.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pledge::{Promise, Runtime};
//!
//! let runtime = Runtime::new();
//!
//! let answer = runtime.block_on(|| {
//!     Promise::<i32, String>::resolve(21)
//!         .then(|n| Ok(n * 2))
//!         .catch(|_| Ok(0))
//! });
//!
//! assert_eq!(answer.peek(), Some(Ok(42)));
//! ```
//!
//! ## Modules
//!
//! - [`error`] — Unhandled-rejection and aggregate errors
//! - [`task`] — Microtask helpers bound to the current runtime
//!
//! ## Getting Started
//!
//! Add Pledge to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pledge = { git = "https://github.com/Nebula-ecosystem/Pledge", package = "pledge" }
//! ```

mod promise;
mod runtime;

pub mod error;

pub use error::{AggregateError, UnhandledRejection};
pub use promise::{Promise, Resolution, Resolver, Settled, State};
pub use runtime::Runtime;
pub use runtime::builder::RuntimeBuilder;
pub use runtime::queue::{Microtask, MicrotaskQueue, Schedule};
pub use runtime::task;

pub use pledge_macros::*;
