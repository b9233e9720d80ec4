//! The pending/await/deliver protocol.
//!
//! [`Pending`] is the contract for "a value that may not be ready yet".
//! Implementations exist for [`Eventual`] and for [`Delivered`]; plain and
//! rejected values are never pending, hand themselves to observers
//! immediately and ignore deliveries. Other single-threaded containers can
//! implement the trait to take part in the same protocol.

use crate::error::Result;
use crate::eventual::{Delivered, Eventual};

/// A one-shot continuation waiting for a settled value.
pub type Observer<T> = Box<dyn FnOnce(Result<T>)>;

/// A value that may not be known yet.
pub trait Pending<T> {
    /// Returns true while the value is not known.
    fn is_pending(&self) -> bool;

    /// Hands the settled value to `observer`, now or once it is known.
    fn await_with(&self, observer: Observer<T>);

    /// Sets the value. Implementations ignore every call but the first.
    fn deliver(&self, value: Delivered<T>);
}

impl<T: Clone + 'static> Pending<T> for Eventual<T> {
    fn is_pending(&self) -> bool {
        Self::is_pending(self)
    }

    fn await_with(&self, observer: Observer<T>) {
        Self::await_with(self, observer);
    }

    fn deliver(&self, value: Delivered<T>) {
        Self::deliver(self, value);
    }
}

impl<T: Clone + 'static> Pending<T> for Delivered<T> {
    fn is_pending(&self) -> bool {
        Self::is_pending(self)
    }

    fn await_with(&self, observer: Observer<T>) {
        Self::await_with(self, observer);
    }

    fn deliver(&self, value: Delivered<T>) {
        if let Self::Eventual(eventual) = self {
            eventual.deliver(value);
        }
    }
}

/// Returns true while `value` is not known.
#[must_use]
pub fn is_pending<T, P: Pending<T> + ?Sized>(value: &P) -> bool {
    value.is_pending()
}

/// Hands the settled value of `value` to `observer`.
pub fn await_value<T, P, F>(value: &P, observer: F)
where
    P: Pending<T> + ?Sized,
    F: FnOnce(Result<T>) + 'static,
{
    value.await_with(Box::new(observer));
}

/// Delivers `data` into `value`.
pub fn deliver<T, P, D>(value: &P, data: D)
where
    P: Pending<T> + ?Sized,
    D: Into<Delivered<T>>,
{
    value.deliver(data.into());
}
