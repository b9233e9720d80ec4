//! Identifier types.
//!
//! Eventuals are compared by handle identity; the [`EventualId`] gives that
//! identity a printable, stable name for diagnostics.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EVENTUAL_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for an eventual.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventualId(u64);

impl EventualId {
    /// Allocates the next identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_EVENTUAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Creates an id with a fixed value for testing purposes.
    #[doc(hidden)]
    #[must_use]
    pub const fn new_for_test(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Debug for EventualId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventualId({})", self.0)
    }
}

impl fmt::Display for EventualId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}
