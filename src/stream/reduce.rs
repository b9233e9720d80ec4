//! The reduce entry point.

use crate::error::Error;
use crate::types::{Item, Step};

/// A source that can be folded with a reducer.
///
/// `reduce` feeds items to `next` together with the running state and
/// returns the final state if the reduction finished before the call
/// returned. Push sources that are still running return `None`; their
/// reducer sees the remaining items and the final call later.
///
/// Every source ends a reduction exactly one way: an `END` call after the
/// last item, a failed item, or a reduced step from `next`.
///
/// States must be `Clone`: a push source copies the state before each
/// value, and a reducer that panics is handed the copy in a
/// [`Item::Failed`] call. Keep states small or share large accumulators
/// behind an `Rc`.
pub trait Reduce<T> {
    /// Folds `self` into `initial` with `next`.
    fn reduce<A, N>(self, next: N, initial: A) -> Option<A>
    where
        A: Clone + 'static,
        N: FnMut(Item<T>, A) -> Step<A> + 'static;
}

/// Folds `source` into `initial` with `next`.
///
/// # Example
///
/// ```
/// use eventual_reduce::{Item, Step, reduce};
///
/// let total = reduce(
///     vec![1, 2, 3],
///     |item: Item<i32>, acc: i32| match item {
///         Item::Value(v) => Step::Continue(acc + v),
///         _ => Step::Continue(acc),
///     },
///     0,
/// );
/// assert_eq!(total, Some(6));
/// ```
pub fn reduce<S, T, A, N>(source: S, next: N, initial: A) -> Option<A>
where
    S: Reduce<T>,
    A: Clone + 'static,
    N: FnMut(Item<T>, A) -> Step<A> + 'static,
{
    source.reduce(next, initial)
}

impl<T> Reduce<T> for Vec<T> {
    fn reduce<A, N>(self, next: N, initial: A) -> Option<A>
    where
        A: Clone + 'static,
        N: FnMut(Item<T>, A) -> Step<A> + 'static,
    {
        Some(super::fold::fold_items(
            self.into_iter().map(Item::Value),
            next,
            initial,
        ))
    }
}

impl<T> Reduce<T> for Error {
    fn reduce<A, N>(self, next: N, initial: A) -> Option<A>
    where
        A: Clone + 'static,
        N: FnMut(Item<T>, A) -> Step<A> + 'static,
    {
        Some(super::fold::fold_failed(self, next, initial))
    }
}
