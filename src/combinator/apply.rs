//! Applying ordinary functions to possibly-pending arguments.
//!
//! [`apply`] waits for its arguments and calls the function once; the
//! [`decorate`] family lifts a function once and returns a wrapper that
//! does the same on every call.

use super::group;
use crate::eventual::{Delivered, IntoDelivered, then};
use std::rc::Rc;

/// Calls `f` with the settled values of `args`.
///
/// Rejects with the first rejected argument in list order; `f` is not
/// called then. `f` may itself reject by returning `Err`, or return an
/// eventual to chain on.
///
/// ```
/// use eventual_reduce::{Delivered, Eventual, apply};
///
/// let b = Eventual::new();
/// let sum = apply(|v: Vec<i32>| Ok(v.iter().sum::<i32>()), [Delivered::Plain(1), Delivered::from(&b)]);
/// b.deliver(Delivered::Plain(2));
/// assert_eq!(sum.settled(), Some(Ok(3)));
/// ```
pub fn apply<F, I, T, U, O>(f: F, args: I) -> Delivered<U>
where
    F: FnOnce(Vec<T>) -> O + 'static,
    I: IntoIterator,
    I::Item: IntoDelivered<Value = T>,
    T: Clone + 'static,
    U: Clone + 'static,
    O: IntoDelivered<Value = U>,
{
    then(group(args), f)
}

/// Like [`apply`], with a function that may itself be pending.
///
/// The function is resolved before the arguments in rejection order: a
/// rejected function wins over rejected arguments.
pub fn apply_eventual<V, F, I, T, U, O>(f: V, args: I) -> Delivered<U>
where
    V: IntoDelivered<Value = F>,
    F: FnOnce(Vec<T>) -> O + Clone + 'static,
    I: IntoIterator,
    I::Item: IntoDelivered<Value = T>,
    T: Clone + 'static,
    U: Clone + 'static,
    O: IntoDelivered<Value = U>,
{
    let values = group(args);
    then(f, move |f: F| then(values, f))
}

/// Lifts `f` to accept possibly-pending arguments.
///
/// The wrapper returns `f`'s result directly when every argument is
/// already settled and an eventual otherwise.
///
/// ```
/// use eventual_reduce::{Delivered, Eventual, decorate};
///
/// let sum = decorate(|v: Vec<i32>| Ok(v.into_iter().sum::<i32>()));
/// let late = Eventual::new();
/// let total = sum(vec![Delivered::Plain(1), Delivered::from(&late)]);
/// late.deliver(Delivered::Plain(41));
/// assert_eq!(total.settled(), Some(Ok(42)));
/// ```
pub fn decorate<F, D, T, U, O>(f: F) -> impl Fn(Vec<D>) -> Delivered<U>
where
    F: Fn(Vec<T>) -> O + 'static,
    D: IntoDelivered<Value = T>,
    T: Clone + 'static,
    U: Clone + 'static,
    O: IntoDelivered<Value = U>,
{
    let f = Rc::new(f);
    move |args: Vec<D>| {
        let f = Rc::clone(&f);
        apply(move |values| f(values), args)
    }
}

/// Lifts a two-argument function to accept possibly-pending arguments of
/// different types.
pub fn decorate2<F, DA, DB, A, B, U, O>(f: F) -> impl Fn(DA, DB) -> Delivered<U>
where
    F: Fn(A, B) -> O + 'static,
    DA: IntoDelivered<Value = A>,
    DB: IntoDelivered<Value = B>,
    A: Clone + 'static,
    B: Clone + 'static,
    U: Clone + 'static,
    O: IntoDelivered<Value = U>,
{
    let f = Rc::new(f);
    move |a: DA, b: DB| {
        let f = Rc::clone(&f);
        let b = b.into_delivered();
        then(a, move |a| then(b, move |b| f(a, b)))
    }
}
