//! The promise state machine.
//!
//! This module defines [`Promise`], the handle to a value that becomes
//! available later, together with the pieces that drive it:
//!
//! - [`Resolver`]: the resolve/reject entry points handed to initializers,
//! - [`Resolution`]: what a continuation may settle a derived promise with,
//! - [`State`]: the `pending -> fulfilled | rejected` lifecycle,
//! - [`Settled`]: per-input outcomes reported by [`Promise::all_settled`].
//!
//! ## How settlement works
//!
//! 1. A resolver entry point queues a settlement check on the runtime.
//! 2. When the check runs, a promise that already settled ignores it.
//! 3. A check carrying another promise adopts it: the outer promise
//!    subscribes its own resolver to the inner one and stays pending.
//! 4. A rejection with no failure continuation registered is handed to the
//!    runtime's unhandled-rejection hook and not recorded.
//! 5. Otherwise the value is recorded and the matching continuations run,
//!    in registration order, inside that same task.
//!
//! Every adoption hop is its own queued task, so adoption chains of any
//! depth settle without growing the native stack.

mod chain;
mod combinators;
mod core;
mod release;
mod resolver;
mod state;

pub use combinators::Settled;
pub use self::core::Promise;
pub use resolver::{Resolution, Resolver};
pub use state::State;
