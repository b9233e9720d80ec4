//! Folding for sources whose items are all known up front.
//!
//! The push-driven case lives in [`reducible`](super::reducible); these
//! are the synchronous loops for empty, failed, singular and indexed
//! sources.

use crate::error::Error;
use crate::types::{Item, Step};

/// Folds `items` in order.
///
/// A reduced step returns its state at once. A terminal item (`END` or a
/// failure) is delivered and then stops the loop. Otherwise `END` follows
/// the last item.
pub(crate) fn fold_items<T, A, N, I>(items: I, mut next: N, initial: A) -> A
where
    I: IntoIterator<Item = Item<T>>,
    N: FnMut(Item<T>, A) -> Step<A>,
{
    let mut state = initial;
    for item in items {
        let terminal = item.is_terminal();
        match next(item, state) {
            Step::Reduced(last) => return last,
            Step::Continue(current) if terminal => return current,
            Step::Continue(current) => state = current,
        }
    }
    next(Item::End, state).into_inner()
}

/// A single value: the value, then `END` even after a reduced step.
pub(crate) fn fold_singular<T, A, N>(value: T, mut next: N, initial: A) -> A
where
    N: FnMut(Item<T>, A) -> Step<A>,
{
    let state = next(Item::Value(value), initial).into_inner();
    next(Item::End, state).into_inner()
}

/// An empty source: one `END` call.
pub(crate) fn fold_empty<T, A, N>(mut next: N, initial: A) -> A
where
    N: FnMut(Item<T>, A) -> Step<A>,
{
    next(Item::End, initial).into_inner()
}

/// A failed source: one call with the error, no `END`.
pub(crate) fn fold_failed<T, A, N>(error: Error, mut next: N, initial: A) -> A
where
    N: FnMut(Item<T>, A) -> Step<A>,
{
    next(Item::Failed(error), initial).into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::END;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    fn recording(
        log: &mut Vec<(Item<i32>, i32)>,
    ) -> impl FnMut(Item<i32>, i32) -> Step<i32> + '_ {
        move |item, acc| {
            log.push((item.clone(), acc));
            Step::Continue(acc + item.into_value().unwrap_or(0))
        }
    }

    #[test]
    fn fold_sum_calls_end_once() {
        init_test("fold_sum_calls_end_once");
        let mut log = Vec::new();
        let items = [1, 2, 3].map(Item::Value);
        let total = fold_items(items, recording(&mut log), 0);
        crate::assert_with_log!(total == 6, "total", 6, total);
        let expected = vec![
            (Item::Value(1), 0),
            (Item::Value(2), 1),
            (Item::Value(3), 3),
            (END, 6),
        ];
        crate::assert_with_log!(log == expected, "calls", expected, log);
        crate::test_complete!("fold_sum_calls_end_once");
    }

    #[test]
    fn fold_stops_after_failed_item() {
        init_test("fold_stops_after_failed_item");
        let mut log = Vec::new();
        let boom = Error::rejected("boom");
        let items = vec![
            Item::Value(1),
            Item::Value(2),
            Item::Failed(boom.clone()),
            Item::Value(3),
            Item::Value(4),
        ];
        let _ = fold_items(items, recording(&mut log), 0);
        let seen: Vec<_> = log.into_iter().map(|(item, _)| item).collect();
        let expected = vec![Item::Value(1), Item::Value(2), Item::Failed(boom)];
        crate::assert_with_log!(seen == expected, "stops at failure", expected, seen);
        crate::test_complete!("fold_stops_after_failed_item");
    }

    #[test]
    fn fold_stops_at_embedded_end() {
        init_test("fold_stops_at_embedded_end");
        let mut log = Vec::new();
        let items = vec![Item::Value(1), END, Item::Value(2)];
        let total = fold_items(items, recording(&mut log), 0);
        crate::assert_with_log!(total == 1, "total", 1, total);
        crate::assert_with_log!(log.len() == 2, "no trailing end", 2, log.len());
        crate::test_complete!("fold_stops_at_embedded_end");
    }

    #[test]
    fn fold_reduced_skips_end() {
        init_test("fold_reduced_skips_end");
        let mut calls = Vec::new();
        let result = fold_items(
            [1, 2, 3].map(Item::Value),
            |item: Item<i32>, acc: &'static str| {
                calls.push((item, acc));
                Step::Reduced("nope")
            },
            "start",
        );
        crate::assert_with_log!(result == "nope", "result", "nope", result);
        let expected = vec![(Item::Value(1), "start")];
        crate::assert_with_log!(calls == expected, "one call", expected, calls);
        crate::test_complete!("fold_reduced_skips_end");
    }

    #[test]
    fn singular_ends_after_reduced_value() {
        init_test("singular_ends_after_reduced_value");
        let mut calls = Vec::new();
        let result = fold_singular(
            9,
            |item: Item<i32>, acc: &'static str| {
                calls.push((item, acc));
                Step::Reduced("done")
            },
            "start",
        );
        crate::assert_with_log!(result == "done", "result", "done", result);
        let expected = vec![(Item::Value(9), "start"), (END, "done")];
        crate::assert_with_log!(calls == expected, "value then END", expected, calls);
        crate::test_complete!("singular_ends_after_reduced_value");
    }

    #[test]
    fn empty_and_failed_sources() {
        init_test("empty_and_failed_sources");
        let mut log = Vec::new();
        let _ = fold_empty(recording(&mut log), 7);
        crate::assert_with_log!(log == vec![(END, 7)], "empty", vec![(END::<i32>, 7)], log);

        let mut log = Vec::new();
        let _ = fold_failed(Error::rejected("x"), recording(&mut log), 7);
        let expected = vec![(Item::Failed(Error::rejected("x")), 7)];
        crate::assert_with_log!(log == expected, "failed", expected, log);
        crate::test_complete!("empty_and_failed_sources");
    }
}
