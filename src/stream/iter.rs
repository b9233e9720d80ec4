//! Convert iterators into reducibles.
//!
//! This module provides the [`iter`] function to turn any re-iterable
//! collection into a [`Reducible`] that honours early stop.

use super::{Forward, Reducible};

/// A reducible that forwards the items of `items`, then `END`.
///
/// `items` is cloned for every reduction, so each run starts from the
/// beginning. Forwarding stops as soon as the run reports reduced.
///
/// # Examples
///
/// ```
/// use eventual_reduce::{Item, Reduce, Step, iter};
///
/// let first_two = iter(1..=100).reduce(
///     |item: Item<u32>, mut seen: Vec<u32>| match item {
///         Item::Value(v) => {
///             seen.push(v);
///             if seen.len() == 2 { Step::Reduced(seen) } else { Step::Continue(seen) }
///         }
///         _ => Step::Continue(seen),
///     },
///     Vec::new(),
/// );
/// assert_eq!(first_two, Some(vec![1, 2]));
/// ```
pub fn iter<I>(items: I) -> Reducible<I::Item>
where
    I: IntoIterator + Clone + 'static,
    I::Item: 'static,
{
    Reducible::new(move |forward: Forward<I::Item>| {
        for value in items.clone() {
            if forward.send(value).is_reduced() {
                return Ok(());
            }
        }
        forward.end();
        Ok(())
    })
}

impl<T: Clone + 'static> FromIterator<T> for Reducible<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        iter(items.into_iter().collect::<Vec<_>>())
    }
}
