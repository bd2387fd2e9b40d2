use std::fmt;

/// Lifecycle state of a promise.
///
/// Transitions only `Pending -> Fulfilled` or `Pending -> Rejected`, exactly
/// once, and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Not settled yet.
    Pending,

    /// Settled with a value.
    Fulfilled,

    /// Settled with a reason.
    Rejected,
}

impl State {
    /// Returns the lowercase name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            State::Pending => "pending",
            State::Fulfilled => "fulfilled",
            State::Rejected => "rejected",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a promise's value lives; the state and the payload can never
/// disagree.
pub(crate) enum Slot<T, E> {
    Pending,
    Fulfilled(T),
    Rejected(E),
}

impl<T, E> Slot<T, E> {
    pub(crate) fn state(&self) -> State {
        match self {
            Slot::Pending => State::Pending,
            Slot::Fulfilled(_) => State::Fulfilled,
            Slot::Rejected(_) => State::Rejected,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }
}
