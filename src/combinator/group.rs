//! Group combinator: many possibly-pending values into one.

use crate::eventual::{Delivered, IntoDelivered, then};

/// Collects `values` into one ordered vector.
///
/// Each element is chained onto the accumulated vector in list order, so
/// the result rejects with the first rejection in list order, not the
/// first to happen. When every element is already settled the vector is
/// returned directly.
///
/// # Example
///
/// ```
/// use eventual_reduce::{Delivered, Eventual, group};
///
/// let late = Eventual::new();
/// let all = group([Delivered::Plain(1), Delivered::from(&late), Delivered::Plain(3)]);
/// assert!(all.is_pending());
///
/// late.deliver(Delivered::Plain(2));
/// assert_eq!(all.settled(), Some(Ok(vec![1, 2, 3])));
/// ```
pub fn group<I>(values: I) -> Delivered<Vec<<I::Item as IntoDelivered>::Value>>
where
    I: IntoIterator,
    I::Item: IntoDelivered,
    <I::Item as IntoDelivered>::Value: Clone + 'static,
{
    values
        .into_iter()
        .fold(Delivered::Plain(Vec::new()), |accumulated, value| {
            let value = value.into_delivered();
            then(accumulated, move |mut sequence: Vec<_>| {
                then(value, move |value| {
                    sequence.push(value);
                    Ok(sequence)
                })
            })
        })
}
