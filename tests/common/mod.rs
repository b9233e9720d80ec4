//! Shared helpers for integration tests.

#![allow(dead_code)]

use eventual_reduce::{Error, Forward, Item, Reducible, Step};
use std::cell::RefCell;
use std::rc::Rc;

pub use eventual_reduce::test_utils::init_test_logging;

/// A shared log plus a cloneable closure appending to it.
pub fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(T) + Clone + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    (log, move |value| sink.borrow_mut().push(value))
}

/// A reducer that records `(item, state)` and sums values.
pub fn summing(
    log: &Rc<RefCell<Vec<(Item<i32>, i32)>>>,
) -> impl FnMut(Item<i32>, i32) -> Step<i32> + 'static {
    let log = log.clone();
    move |item, acc| {
        log.borrow_mut().push((item.clone(), acc));
        Step::Continue(acc + item.into_value().unwrap_or(0))
    }
}

/// A push source controlled by the test.
///
/// Every reduction of the paired source replaces the held run, so the
/// emitter always drives the most recent one.
pub struct Emitter<T> {
    current: Rc<RefCell<Option<Forward<T>>>>,
    opened: Rc<RefCell<usize>>,
}

/// Creates an emitter and the source it drives.
pub fn emitter<T: Clone + 'static>() -> (Emitter<T>, Reducible<T>) {
    let current: Rc<RefCell<Option<Forward<T>>>> = Rc::default();
    let opened = Rc::new(RefCell::new(0));
    let slot = current.clone();
    let count = opened.clone();
    let source = Reducible::new(move |forward| {
        *count.borrow_mut() += 1;
        *slot.borrow_mut() = Some(forward);
        Ok(())
    });
    (Emitter { current, opened }, source)
}

impl<T: Clone + 'static> Emitter<T> {
    fn forward(&self, item: Item<T>) -> bool {
        let forward = self.current.borrow().clone();
        forward.is_some_and(|forward| forward.forward(item).is_reduced())
    }

    /// Sends a value; returns true if the run has finished.
    pub fn send(&self, value: T) -> bool {
        self.forward(Item::Value(value))
    }

    pub fn end(&self) -> bool {
        self.forward(Item::End)
    }

    pub fn fail(&self, error: Error) -> bool {
        self.forward(Item::Failed(error))
    }

    /// True once the current run has finished, or if none started.
    pub fn is_closed(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_none_or(Forward::is_closed)
    }

    /// How many times the source has been reduced.
    pub fn opened(&self) -> usize {
        *self.opened.borrow()
    }
}
