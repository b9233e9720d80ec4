//! Optional tracing integration.
//!
//! With the `tracing-integration` feature enabled, this module re-exports
//! the `tracing` event macros. Without it, the same names resolve to
//! macros that expand to nothing, so call sites never need their own
//! `#[cfg]`.
//!
//! Field values passed to the no-op macros are not evaluated.

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {debug, trace, warn};
}

#[cfg(not(feature = "tracing-integration"))]
pub(crate) use noop::{debug, trace, warn};
