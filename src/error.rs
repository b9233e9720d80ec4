//! Error types.
//!
//! Rejections travel through the same channel as ordinary values: an
//! [`Error`] is delivered into an eventual or forwarded into a reduction
//! like any other item. This module defines that value and the
//! [`ErrorKind`] used to classify it.

use core::fmt;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

/// Classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Application-level rejection carrying a message.
    Rejected,
    /// A handler, reducer boundary or driver panicked; the panic was caught.
    Panicked,
    /// A foreign error wrapped without conversion.
    Custom,
}

impl ErrorKind {
    /// Returns the kind name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::Panicked => "panicked",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejection value.
///
/// Cloning is cheap: foreign errors are shared behind an [`Arc`], so every
/// observer of a rejected eventual sees the same underlying error.
///
/// # Example
///
/// ```
/// use eventual_reduce::{Error, ErrorKind};
///
/// let err = Error::rejected("boom");
/// assert_eq!(err.kind(), ErrorKind::Rejected);
/// assert_eq!(err.to_string(), "rejected: boom");
/// ```
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Application-level rejection.
    #[error("rejected: {0}")]
    Rejected(String),
    /// A caught panic, payload rendered to text.
    #[error("panicked: {0}")]
    Panicked(String),
    /// A foreign error.
    #[error(transparent)]
    Custom(Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Creates an application rejection with the given message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Wraps a foreign error.
    #[must_use]
    pub fn custom<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(error))
    }

    /// Converts a caught panic payload into an error.
    ///
    /// `&str` and `String` payloads keep their text; anything else is
    /// reported as an opaque panic.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "opaque panic payload".to_owned());
        Self::Panicked(message)
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Rejected(_) => ErrorKind::Rejected,
            Self::Panicked(_) => ErrorKind::Panicked,
            Self::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Returns true if this error came from a caught panic.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    /// Returns the message of a rejection or panic, `None` for foreign errors.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) | Self::Panicked(message) => Some(message),
            Self::Custom(_) => None,
        }
    }
}

// Foreign errors compare by identity: two rejections are the same only if
// they share the same underlying allocation.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rejected(a), Self::Rejected(b)) | (Self::Panicked(a), Self::Panicked(b)) => {
                a == b
            }
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Error {}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
