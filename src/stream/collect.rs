//! Collect a source into an eventual vector.
//!
//! [`collect`] bridges the two halves of the crate: the reduction runs as
//! usual and its outcome is delivered into an [`Eventual`], so a push
//! source that finishes later can still be awaited with
//! [`when`](crate::when).

use super::Reduce;
use crate::eventual::{Delivered, Eventual};
use crate::types::{Item, Step};
use std::mem;

/// Collects every value of `source`.
///
/// Realizes with the values in order once the source ends, or rejects
/// with the first failure. Returns the settled result directly when the
/// source finished synchronously.
///
/// ```
/// use eventual_reduce::{Delivered, collect, iter};
///
/// let values = collect(iter(vec![1, 2, 3]));
/// assert!(matches!(values, Delivered::Plain(ref v) if v == &[1, 2, 3]));
/// ```
pub fn collect<S, T>(source: S) -> Delivered<Vec<T>>
where
    S: Reduce<T>,
    T: Clone + 'static,
{
    let target = Eventual::new();
    let sink = target.clone();
    // Values accumulate in the reducer; the running state is `()`.
    let mut values = Vec::new();
    let _ = source.reduce(
        move |item, ()| match item {
            Item::Value(value) => {
                values.push(value);
                Step::Continue(())
            }
            Item::End => {
                sink.deliver(Delivered::Plain(mem::take(&mut values)));
                Step::Reduced(())
            }
            Item::Failed(error) => {
                sink.deliver(Delivered::Rejected(error));
                Step::Reduced(())
            }
        },
        (),
    );
    match target.settled() {
        Some(result) => result.into(),
        None => target.into(),
    }
}
