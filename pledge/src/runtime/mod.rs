//! Core runtime components.
//!
//! This module contains the deferred-task machinery promises are built on:
//! the scheduling seam, the default FIFO queue, and the runtime that drains
//! it.
//!
//! It is responsible for:
//! - queueing microtasks in FIFO order,
//! - draining them after the current synchronous execution completes,
//! - providing the thread-local runtime context,
//! - routing unhandled rejections to the configured hook.
//!
//! Most users will only touch [`Runtime`] and [`RuntimeBuilder`]; the
//! [`Schedule`] trait is the seam for substituting a custom queue.

mod core;

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod queue;

pub mod task;

pub use self::core::Runtime;
pub(crate) use self::core::RuntimeHandle;
