//! E2E: the reduce protocol over indexed, empty, singular, failed and
//! push-driven sources, and the forwarding wrapper's termination rules.

#![allow(missing_docs)]

mod common;

use common::{emitter, init_test_logging, recorder, summing};
use eventual_reduce::{
    END, Error, Forward, Item, Reduce, Reducible, Source, Step, collect, is_error, iter, reduce,
    reduced, reducible,
};
use eventual_reduce::{assert_with_log, test_complete, test_phase};
use std::cell::RefCell;
use std::rc::Rc;

type Calls = Rc<RefCell<Vec<(Item<i32>, i32)>>>;

fn boom() -> Error {
    Error::rejected("Boom!")
}

// =========================================================================
// Indexed sources
// =========================================================================

#[test]
fn e2e_reduce_passes_all_values() {
    init_test_logging();
    test_phase!("e2e_reduce_passes_all_values");
    let calls = Calls::default();
    let result = reduce(vec![1, 2, 3], summing(&calls), 0);
    let calls = calls.borrow().clone();
    let expected = vec![
        (Item::Value(1), 0),
        (Item::Value(2), 1),
        (Item::Value(3), 3),
        (END, 6),
    ];
    assert_with_log!(calls == expected, "calls", expected, calls);
    assert_with_log!(result == Some(6), "result", Some(6), result);
    test_complete!("e2e_reduce_passes_all_values");
}

#[test]
fn e2e_reduced_early() {
    init_test_logging();
    test_phase!("e2e_reduced_early");
    let (log, push) = recorder();
    let result = reduce(
        vec![1, 2, 3],
        move |item: Item<i32>, acc: &'static str| {
            push((item, acc));
            reduced("nope")
        },
        "start",
    );
    let seen = log.borrow().clone();
    assert_with_log!(seen == vec![(Item::Value(1), "start")], "one call", "[(1, start)]", seen);
    assert_with_log!(result == Some("nope"), "boxed value", Some("nope"), result);
    test_complete!("e2e_reduced_early");
}

#[test]
fn e2e_reduce_errored() {
    init_test_logging();
    test_phase!("e2e_reduce_errored");
    let (log, push) = recorder();
    let source = Source::items([
        Item::Value(1),
        Item::Value(2),
        Item::Failed(boom()),
        Item::Value(3),
        Item::Value(4),
    ]);
    let _ = reduce(
        source,
        move |item: Item<i32>, ()| {
            push(item);
            Step::Continue(())
        },
        (),
    );
    let seen = log.borrow().clone();
    let expected = vec![Item::Value(1), Item::Value(2), Item::Failed(boom())];
    assert_with_log!(seen == expected, "errors end the source", expected, seen);
    let last_is_error = seen.last().is_some_and(is_error);
    assert_with_log!(last_is_error, "last is error", true, last_is_error);
    test_complete!("e2e_reduce_errored");
}

#[test]
fn e2e_reduce_late_error_is_irrelevant() {
    init_test_logging();
    test_phase!("e2e_reduce_late_error_is_irrelevant");
    let (log, push) = recorder();
    let source = Source::items([Item::Value(1), Item::Value(2), Item::Failed(boom())]);
    let _ = reduce(
        source,
        move |item: Item<i32>, ()| {
            push(item);
            reduced(())
        },
        (),
    );
    let seen = log.borrow().clone();
    assert_with_log!(seen == vec![Item::Value(1)], "first only", "[1]", seen);
    test_complete!("e2e_reduce_late_error_is_irrelevant");
}

#[test]
fn e2e_reduce_empty_and_singular() {
    init_test_logging();
    test_phase!("e2e_reduce_empty_and_singular");
    let trace = |source: Source<&'static str>| {
        let (log, push) = recorder();
        let _ = reduce(
            source,
            move |item: Item<&'static str>, ()| {
                push(item);
                Step::Continue(())
            },
            (),
        );
        log.take()
    };
    let empty = trace(Source::Empty);
    assert_with_log!(empty == vec![END], "empty", "[END]", empty);
    let none = trace(None.into());
    assert_with_log!(none == vec![END], "none", "[END]", none);
    let nothing = trace(Vec::new().into());
    assert_with_log!(nothing == vec![END], "[]", "[END]", nothing);
    let single = trace(Source::Singular("world"));
    assert_with_log!(single == vec![Item::Value("world"), END], "singular", "[world, END]", single);
    test_complete!("e2e_reduce_empty_and_singular");
}

#[test]
fn e2e_singular_always_ends() {
    init_test_logging();
    test_phase!("e2e_singular_always_ends");
    let (log, push) = recorder();
    let result = reduce(
        Source::Singular(4),
        move |item: Item<i32>, acc: i32| {
            push(item.clone());
            Step::Reduced(acc + item.into_value().unwrap_or(0))
        },
        1,
    );
    let seen = log.take();
    let expected = vec![Item::Value(4), END];
    assert_with_log!(seen == expected, "END after reduced value", expected, seen);
    assert_with_log!(result == Some(5), "state", Some(5), result);
    test_complete!("e2e_singular_always_ends");
}

#[test]
fn e2e_reduce_failed_source() {
    init_test_logging();
    test_phase!("e2e_reduce_failed_source");
    let calls = Calls::default();
    let result = boom().reduce(summing(&calls), 5);
    let calls = calls.borrow().clone();
    let expected = vec![(Item::Failed(boom()), 5)];
    assert_with_log!(calls == expected, "one call, no END", expected, calls);
    assert_with_log!(result == Some(5), "state", Some(5), result);
    test_complete!("e2e_reduce_failed_source");
}

// =========================================================================
// Reducible sources
// =========================================================================

#[test]
fn e2e_reducible_matches_indexed() {
    init_test_logging();
    test_phase!("e2e_reducible_matches_indexed");
    let pushed = Calls::default();
    let fixture = reducible(|forward: Forward<i32>| {
        forward.send(1);
        forward.send(2);
        forward.end();
        Ok(())
    });
    let pushed_result = fixture.reduce(summing(&pushed), 0);

    let indexed = Calls::default();
    let indexed_result = reduce(vec![1, 2], summing(&indexed), 0);

    let (pushed, indexed) = (pushed.borrow().clone(), indexed.borrow().clone());
    assert_with_log!(pushed == indexed, "same calls", indexed, pushed);
    assert_with_log!(pushed_result == indexed_result, "same result", indexed_result, pushed_result);
    test_complete!("e2e_reducible_matches_indexed");
}

#[test]
fn e2e_error_force_ends_reducible() {
    init_test_logging();
    test_phase!("e2e_error_force_ends_reducible");
    let calls = Calls::default();
    let fixture = Reducible::new(|forward: Forward<i32>| {
        forward.send(1);
        forward.fail(boom());
        forward.send(2);
        forward.fail(Error::rejected("BraxxxX"));
        forward.send(3);
        forward.end();
        forward.send(4);
        Ok(())
    });
    let _ = fixture.reduce(summing(&calls), 0);
    let calls = calls.borrow().clone();
    let expected = vec![(Item::Value(1), 0), (Item::Failed(boom()), 1)];
    assert_with_log!(calls == expected, "error ends", expected, calls);
    test_complete!("e2e_error_force_ends_reducible");
}

#[test]
fn e2e_end_force_ends_reducible() {
    init_test_logging();
    test_phase!("e2e_end_force_ends_reducible");
    let calls = Calls::default();
    let fixture = Reducible::new(|forward: Forward<i32>| {
        forward.send(1);
        forward.end();
        forward.send(2);
        forward.send(3);
        forward.fail(boom());
        forward.send(4);
        forward.end();
        forward.send(5);
        Ok(())
    });
    let _ = fixture.reduce(summing(&calls), 0);
    let calls = calls.borrow().clone();
    let expected = vec![(Item::Value(1), 0), (END, 1)];
    assert_with_log!(calls == expected, "end ends", expected, calls);
    test_complete!("e2e_end_force_ends_reducible");
}

#[test]
fn e2e_driver_failure_force_ends_reducible() {
    init_test_logging();
    test_phase!("e2e_driver_failure_force_ends_reducible");
    let calls = Calls::default();
    let fixture = Reducible::new(|forward: Forward<i32>| {
        forward.send(1);
        Err(boom())
    });
    let _ = fixture.reduce(summing(&calls), 0);
    let calls = calls.borrow().clone();
    let expected = vec![(Item::Value(1), 0), (Item::Failed(boom()), 1)];
    assert_with_log!(calls == expected, "driver error ends", expected, calls);
    test_complete!("e2e_driver_failure_force_ends_reducible");
}

#[test]
fn e2e_asynchronous_driver() {
    init_test_logging();
    test_phase!("e2e_asynchronous_driver");
    let (emitter, source) = emitter::<i32>();
    let values = collect(source);
    assert_with_log!(values.is_pending(), "pending", true, values.is_pending());
    assert_with_log!(emitter.opened() == 1, "opened once", 1, emitter.opened());

    emitter.send(1);
    emitter.send(2);
    let stopped = emitter.end();
    assert_with_log!(stopped, "end reported reduced", true, stopped);
    let late = emitter.send(3);
    assert_with_log!(late, "late forward reduced", true, late);

    let settled = values.settled();
    assert_with_log!(settled == Some(Ok(vec![1, 2])), "values", "[1, 2]", settled);
    test_complete!("e2e_asynchronous_driver");
}

#[test]
fn e2e_reducer_panic_ends_asynchronous_run() {
    init_test_logging();
    test_phase!("e2e_reducer_panic_ends_asynchronous_run");
    let (emitter, source) = emitter::<i32>();
    let calls = Calls::default();
    let log = calls.clone();
    let _ = source.reduce(
        move |item: Item<i32>, acc: i32| {
            log.borrow_mut().push((item.clone(), acc));
            match item {
                Item::Value(2) => panic!("bad value"),
                Item::Value(v) => Step::Continue(acc + v),
                _ => Step::Continue(acc),
            }
        },
        0,
    );

    let first = emitter.send(1);
    assert_with_log!(!first, "first accepted", false, first);
    let failed = emitter.send(2);
    assert_with_log!(failed, "panic reported reduced", true, failed);
    assert_with_log!(emitter.is_closed(), "closed", true, emitter.is_closed());
    let late = emitter.send(3);
    assert_with_log!(late, "late forward reduced", true, late);
    emitter.end();

    let calls = calls.borrow().clone();
    let expected = vec![
        (Item::Value(1), 0),
        (Item::Value(2), 1),
        (Item::Failed(Error::Panicked("bad value".into())), 1),
    ];
    assert_with_log!(calls == expected, "single terminal call", expected, calls);
    test_complete!("e2e_reducer_panic_ends_asynchronous_run");
}

#[test]
fn e2e_iter_early_stop() {
    init_test_logging();
    test_phase!("e2e_iter_early_stop");
    let (log, push) = recorder();
    let result = iter(1..).reduce(
        move |item: Item<u64>, acc: u64| {
            push(item.clone());
            match item {
                Item::Value(v) if acc + v > 10 => Step::Reduced(acc),
                Item::Value(v) => Step::Continue(acc + v),
                _ => Step::Continue(acc),
            }
        },
        0,
    );
    assert_with_log!(result == Some(10), "sum below limit", Some(10), result);
    let seen = log.borrow().len();
    // 1..=5 plus the END delivered when the run stops.
    assert_with_log!(seen == 6, "calls", 6, seen);
    test_complete!("e2e_iter_early_stop");
}
