//! Shared vocabulary for both halves of the crate.
//!
//! - [`id`]: Identifier types (`EventualId`)
//! - [`item`]: Stream items and the [`END`] marker
//! - [`step`]: Reducer steps and the reduced box

pub mod id;
pub mod item;
pub mod step;

pub use id::EventualId;
pub use item::{END, Item};
pub use step::{Step, is_reduced, reduced};

use crate::error::Error;

/// Values that may represent a rejection.
///
/// This replaces run-time inspection of "error-like" values: every type
/// that can carry a rejection says so explicitly.
pub trait MaybeError {
    /// Returns true if this value is a rejection.
    fn is_error(&self) -> bool;
}

/// Returns true if `value` is a rejection.
#[must_use]
pub fn is_error<V: MaybeError + ?Sized>(value: &V) -> bool {
    value.is_error()
}

impl MaybeError for Error {
    fn is_error(&self) -> bool {
        true
    }
}

impl<T> MaybeError for Item<T> {
    fn is_error(&self) -> bool {
        matches!(self, Item::Failed(_))
    }
}

impl<T, E> MaybeError for Result<T, E> {
    fn is_error(&self) -> bool {
        self.is_err()
    }
}
