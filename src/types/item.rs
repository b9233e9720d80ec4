//! Stream items and the end-of-stream marker.

use crate::error::Error;

/// An item handed to a reducer.
///
/// A reduction sees zero or more [`Item::Value`]s followed by at most one
/// terminal item: [`Item::End`] for graceful completion or
/// [`Item::Failed`] for an error. `End` is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<T> {
    /// An ordinary stream value.
    Value(T),
    /// Graceful end of stream.
    End,
    /// The stream failed with the given error.
    Failed(Error),
}

/// The end-of-stream marker.
pub use Item::End as END;

impl<T> Item<T> {
    /// Returns true for [`Item::End`].
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Returns true for [`Item::Failed`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true for the terminal items, [`Item::End`] and [`Item::Failed`].
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Value(_))
    }

    /// Returns a reference to the value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Maps the value, leaving terminal items untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Item<U> {
        match self {
            Self::Value(value) => Item::Value(f(value)),
            Self::End => Item::End,
            Self::Failed(error) => Item::Failed(error),
        }
    }
}

impl<T> From<crate::error::Result<T>> for Item<T> {
    fn from(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Failed(error),
        }
    }
}
