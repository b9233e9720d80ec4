//! Values that can be delivered into an eventual.

use super::Eventual;
use crate::error::{Error, Result};
use crate::pending::Observer;
use crate::types::MaybeError;

/// A value, a rejection, or an eventual standing for either.
///
/// This is what [`Eventual::deliver`] accepts and what
/// [`when`](crate::when) returns: when a handler runs synchronously the
/// result is returned as-is, otherwise it is an [`Delivered::Eventual`]
/// that settles later.
#[derive(Debug, Clone)]
pub enum Delivered<T> {
    /// An ordinary, already known value.
    Plain(T),
    /// A rejection.
    Rejected(Error),
    /// A value that may not be known yet.
    Eventual(Eventual<T>),
}

impl<T: Clone + 'static> Delivered<T> {
    /// Returns true if this is a rejection.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Returns true if this is an eventual that has not been realized.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        match self {
            Self::Eventual(eventual) => eventual.is_pending(),
            Self::Plain(_) | Self::Rejected(_) => false,
        }
    }

    /// Returns the settled value without registering an observer.
    ///
    /// Realized eventuals are followed through to whatever they forward
    /// to. Returns `None` while anything along the way is still pending.
    #[must_use]
    pub fn settled(&self) -> Option<Result<T>> {
        match self {
            Self::Plain(value) => Some(Ok(value.clone())),
            Self::Rejected(error) => Some(Err(error.clone())),
            Self::Eventual(eventual) => eventual.settled(),
        }
    }

    /// Hands the settled value to `observer`.
    ///
    /// Plain values and rejections fire immediately; an eventual queues
    /// the observer until it settles.
    pub fn await_with(&self, observer: Observer<T>) {
        match self {
            Self::Plain(value) => observer(Ok(value.clone())),
            Self::Rejected(error) => observer(Err(error.clone())),
            Self::Eventual(eventual) => eventual.await_with(observer),
        }
    }

    /// Returns true if delivering `self` into `target` would make `target`
    /// wait on itself.
    pub(crate) fn forwards_to(&self, target: &Eventual<T>) -> bool {
        match self {
            Self::Eventual(eventual) => eventual.forwards_to(target),
            Self::Plain(_) | Self::Rejected(_) => false,
        }
    }
}

impl<T> MaybeError for Delivered<T> {
    fn is_error(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl<T> From<Result<T>> for Delivered<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Plain(value),
            Err(error) => Self::Rejected(error),
        }
    }
}

impl<T> From<Eventual<T>> for Delivered<T> {
    fn from(eventual: Eventual<T>) -> Self {
        Self::Eventual(eventual)
    }
}

impl<T> From<&Eventual<T>> for Delivered<T> {
    fn from(eventual: &Eventual<T>) -> Self {
        Self::Eventual(eventual.clone())
    }
}

/// Conversion into a [`Delivered`] value.
///
/// Used for the inputs of [`when`](crate::when) and friends and for what
/// their handlers return. A handler "throws" by returning `Err`, and can
/// hand back another eventual to chain on it.
pub trait IntoDelivered {
    /// The value type once settled.
    type Value;

    /// Performs the conversion.
    fn into_delivered(self) -> Delivered<Self::Value>;
}

impl<T> IntoDelivered for Delivered<T> {
    type Value = T;

    fn into_delivered(self) -> Delivered<T> {
        self
    }
}

impl<T> IntoDelivered for Eventual<T> {
    type Value = T;

    fn into_delivered(self) -> Delivered<T> {
        Delivered::Eventual(self)
    }
}

impl<T> IntoDelivered for &Eventual<T> {
    type Value = T;

    fn into_delivered(self) -> Delivered<T> {
        Delivered::Eventual(self.clone())
    }
}

impl<T> IntoDelivered for Result<T> {
    type Value = T;

    fn into_delivered(self) -> Delivered<T> {
        self.into()
    }
}
