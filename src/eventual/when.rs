//! The `when` family: attaching handlers to possibly-pending values.
//!
//! [`when`] routes a settled value to `on_realize` or `on_reject` and
//! returns whatever the handler produced. [`then`], [`recover`] and
//! [`follow`] are the same operation with one or both handlers replaced by
//! identity pass-through, which is what makes rejections contagious.
//!
//! Handlers never unwind into the delivery loop. A handler that returns
//! `Err` rejects its derived value; a handler that panics is caught and
//! its panic becomes the rejection.

use super::{Delivered, Eventual, IntoDelivered};
use crate::error::{Error, Result};
use crate::tracing_compat::warn;
use std::cell::RefCell;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Where the result of a handler goes.
enum Slot<U> {
    /// `when` has not returned and the handler has not run.
    Waiting,
    /// The handler ran before `when` returned.
    Ready(Delivered<U>),
    /// `when` returned this eventual; the handler delivers into it.
    Derived(Eventual<U>),
}

/// Runs `handler`, converting a panic into a rejection.
fn attempt<T, U, H>(handler: H, data: Result<T>) -> Delivered<U>
where
    H: FnOnce(Result<T>) -> Delivered<U>,
{
    match panic::catch_unwind(AssertUnwindSafe(move || handler(data))) {
        Ok(result) => result,
        Err(payload) => {
            let error = Error::from_panic(payload);
            warn!(%error, "handler panicked; rejecting derived value");
            Delivered::Rejected(error)
        }
    }
}

/// Registers `handler` on `value` and returns its eventual result.
fn observe<T, U, H>(value: Delivered<T>, handler: H) -> Delivered<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
    H: FnOnce(Result<T>) -> Delivered<U> + 'static,
{
    let eventual = match value {
        Delivered::Plain(value) => return attempt(handler, Ok(value)),
        Delivered::Rejected(error) => return attempt(handler, Err(error)),
        Delivered::Eventual(eventual) => eventual,
    };

    let slot = Rc::new(RefCell::new(Slot::Waiting));
    let target = Rc::clone(&slot);
    eventual.await_with(Box::new(move |data| {
        let result = attempt(handler, data);
        let mut target = target.borrow_mut();
        let derived = match &*target {
            Slot::Derived(derived) => Some(derived.clone()),
            Slot::Waiting | Slot::Ready(_) => None,
        };
        match derived {
            Some(derived) => {
                drop(target);
                derived.deliver(result);
            }
            None => *target = Slot::Ready(result),
        }
    }));

    let mut slot = slot.borrow_mut();
    match mem::replace(&mut *slot, Slot::Waiting) {
        Slot::Ready(result) => result,
        Slot::Waiting | Slot::Derived(_) => {
            let derived = Eventual::new();
            *slot = Slot::Derived(derived.clone());
            Delivered::Eventual(derived)
        }
    }
}

/// Attaches a success and a rejection handler to `value`.
///
/// If `value` is already settled the chosen handler runs now and its
/// result is returned directly. Otherwise a pending eventual is returned
/// and realized with the handler's result once `value` settles.
///
/// # Example
///
/// ```
/// use eventual_reduce::{Delivered, Eventual, Error, when};
///
/// let source = Eventual::new();
/// let message = when(
///     &source,
///     |n: u32| Ok(format!("got {n}")),
///     |e: Error| Ok(format!("failed: {e}")),
/// );
/// source.deliver(Delivered::Rejected(Error::rejected("timeout")));
/// assert_eq!(message.settled(), Some(Ok("failed: rejected: timeout".to_string())));
/// ```
pub fn when<V, U, F, R, OF, OR>(value: V, on_realize: F, on_reject: R) -> Delivered<U>
where
    V: IntoDelivered,
    V::Value: Clone + 'static,
    U: Clone + 'static,
    F: FnOnce(V::Value) -> OF + 'static,
    R: FnOnce(Error) -> OR + 'static,
    OF: IntoDelivered<Value = U>,
    OR: IntoDelivered<Value = U>,
{
    observe(value.into_delivered(), move |data| match data {
        Ok(value) => on_realize(value).into_delivered(),
        Err(error) => on_reject(error).into_delivered(),
    })
}

/// Attaches a success handler; rejections pass through unchanged.
pub fn then<V, U, F, O>(value: V, on_realize: F) -> Delivered<U>
where
    V: IntoDelivered,
    V::Value: Clone + 'static,
    U: Clone + 'static,
    F: FnOnce(V::Value) -> O + 'static,
    O: IntoDelivered<Value = U>,
{
    observe(value.into_delivered(), move |data| match data {
        Ok(value) => on_realize(value).into_delivered(),
        Err(error) => Delivered::Rejected(error),
    })
}

/// Attaches a rejection handler; successful values pass through unchanged.
pub fn recover<V, F, O>(value: V, on_error: F) -> Delivered<V::Value>
where
    V: IntoDelivered,
    V::Value: Clone + 'static,
    F: FnOnce(Error) -> O + 'static,
    O: IntoDelivered<Value = V::Value>,
{
    observe(value.into_delivered(), move |data| match data {
        Ok(value) => Delivered::Plain(value),
        Err(error) => on_error(error).into_delivered(),
    })
}

/// Derives a value that settles exactly like `value`.
pub fn follow<V>(value: V) -> Delivered<V::Value>
where
    V: IntoDelivered,
    V::Value: Clone + 'static,
{
    observe(value.into_delivered(), Delivered::<V::Value>::from)
}

impl<T: Clone + 'static> Delivered<T> {
    /// Method form of [`then`].
    pub fn then<U, F, O>(self, on_realize: F) -> Delivered<U>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> O + 'static,
        O: IntoDelivered<Value = U>,
    {
        then(self, on_realize)
    }

    /// Method form of [`recover`].
    pub fn recover<F, O>(self, on_error: F) -> Self
    where
        F: FnOnce(Error) -> O + 'static,
        O: IntoDelivered<Value = T>,
    {
        recover(self, on_error)
    }
}
