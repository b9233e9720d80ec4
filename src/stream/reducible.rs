//! Push-driven sources and the forwarding wrapper.
//!
//! A [`Reducible`] stores a driver. Every reduction starts a fresh run:
//! the driver is handed a [`Forward`] handle and pushes items through it,
//! whenever it likes, until the run finishes. A run finishes exactly once,
//! for one of three causes:
//!
//! - the driver forwards [`END`](crate::END);
//! - the driver forwards a failure, returns `Err`, or panics;
//! - the reducer returns a reduced step;
//! - the reducer panics on a value.
//!
//! On finishing the reducer sees one final call carrying the cause (`END`
//! for a graceful end or a reduced step, the error otherwise). After that
//! every forward reports [`Step::Reduced`] and is otherwise ignored.
//!
//! The state is cloned before each value is handed to the reducer. A
//! reducer that panics gets that copy back in its [`Item::Failed`] call,
//! with an [`Error::Panicked`] describing the panic.

use super::Reduce;
use crate::error::{Error, Result};
use crate::tracing_compat::{debug, trace, warn};
use crate::types::{Item, Step};
use core::fmt;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

type Driver<T> = Rc<dyn Fn(Forward<T>) -> Result<()>>;

/// A push-style source defined by a driver function.
///
/// # Example
///
/// ```
/// use eventual_reduce::{Item, Reduce, Reducible, Step};
///
/// let numbers = Reducible::new(|forward| {
///     forward.send(1);
///     forward.send(2);
///     forward.end();
///     Ok(())
/// });
/// let sum = numbers.reduce(
///     |item: Item<i32>, acc: i32| Step::Continue(acc + item.into_value().unwrap_or(0)),
///     0,
/// );
/// assert_eq!(sum, Some(3));
/// ```
pub struct Reducible<T> {
    driver: Driver<T>,
}

impl<T: 'static> Reducible<T> {
    /// Wraps `driver`. Nothing runs until the reducible is reduced.
    pub fn new<D>(driver: D) -> Self
    where
        D: Fn(Forward<T>) -> Result<()> + 'static,
    {
        Self {
            driver: Rc::new(driver),
        }
    }
}

/// Wraps `driver` into a [`Reducible`].
pub fn reducible<T, D>(driver: D) -> Reducible<T>
where
    T: 'static,
    D: Fn(Forward<T>) -> Result<()> + 'static,
{
    Reducible::new(driver)
}

impl<T> Clone for Reducible<T> {
    fn clone(&self) -> Self {
        Self {
            driver: Rc::clone(&self.driver),
        }
    }
}

impl<T> fmt::Debug for Reducible<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducible").finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> Reduce<T> for Reducible<T> {
    fn reduce<A, N>(self, next: N, initial: A) -> Option<A>
    where
        A: Clone + 'static,
        N: FnMut(Item<T>, A) -> Step<A> + 'static,
    {
        let run = Rc::new(Run::new(next, initial));
        let forward = Forward {
            sink: Rc::clone(&run) as Rc<dyn Sink<T>>,
        };
        let driver = Rc::clone(&self.driver);
        match panic::catch_unwind(AssertUnwindSafe(move || driver(forward))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => run.abort(error),
            Err(payload) => {
                let error = Error::from_panic(payload);
                warn!(%error, "driver panicked; failing reduction");
                run.abort(error);
            }
        }
        run.take_outcome()
    }
}

/// What the reducer's answer means for the run.
enum Signal<A> {
    Continue(A),
    Stop(A),
    Failed(A, Error),
}

/// Run state, type-erased for the driver.
trait Sink<T> {
    fn forward(&self, item: Item<T>) -> Step<()>;
    fn is_closed(&self) -> bool;
}

struct Core<T, A> {
    /// `None` only while the reducer holds it or after finishing.
    state: Option<A>,
    finished: bool,
    /// Set while a forward is being processed.
    busy: bool,
    backlog: VecDeque<Item<T>>,
    outcome: Option<A>,
}

struct Run<T, A, N> {
    core: RefCell<Core<T, A>>,
    next: RefCell<N>,
}

impl<T, A, N> Run<T, A, N>
where
    A: Clone,
    N: FnMut(Item<T>, A) -> Step<A>,
{
    fn new(next: N, initial: A) -> Self {
        Self {
            core: RefCell::new(Core {
                state: Some(initial),
                finished: false,
                busy: false,
                backlog: VecDeque::new(),
                outcome: None,
            }),
            next: RefCell::new(next),
        }
    }

    fn take_outcome(&self) -> Option<A> {
        self.core.borrow_mut().outcome.take()
    }

    fn take_state(&self) -> Option<A> {
        self.core.borrow_mut().state.take()
    }

    /// Feeds one item to the reducer and applies the resulting signal.
    fn process(&self, item: Item<T>) {
        let Some(state) = self.take_state() else {
            return;
        };
        let signal = match item {
            Item::Value(value) => {
                let kept = state.clone();
                let step = panic::catch_unwind(AssertUnwindSafe(|| {
                    (&mut *self.next.borrow_mut())(Item::Value(value), state)
                }));
                match step {
                    Ok(Step::Continue(state)) => Signal::Continue(state),
                    Ok(Step::Reduced(state)) => Signal::Stop(state),
                    Err(payload) => {
                        let error = Error::from_panic(payload);
                        warn!(%error, "reducer panicked; failing reduction");
                        Signal::Failed(kept, error)
                    }
                }
            }
            Item::End => Signal::Stop(state),
            Item::Failed(error) => Signal::Failed(state, error),
        };
        match signal {
            Signal::Continue(state) => self.core.borrow_mut().state = Some(state),
            Signal::Stop(state) => self.finish(Item::End, state),
            Signal::Failed(state, error) => self.finish(Item::Failed(error), state),
        }
    }

    /// Hands the cause and final state to the reducer, once.
    fn finish(&self, cause: Item<T>, state: A) {
        {
            let mut core = self.core.borrow_mut();
            core.finished = true;
            core.backlog.clear();
        }
        debug!(failed = cause.is_error(), "reduction finished");
        let last = panic::catch_unwind(AssertUnwindSafe(|| {
            (&mut *self.next.borrow_mut())(cause, state).into_inner()
        }));
        match last {
            Ok(last) => self.core.borrow_mut().outcome = Some(last),
            // The reducer consumed the state; no outcome.
            Err(payload) => {
                #[cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]
                let error = Error::from_panic(payload);
                warn!(%error, "reducer panicked on its final call");
            }
        }
    }

    /// Fails the run from outside any forward call.
    fn abort(&self, error: Error) {
        if self.core.borrow().finished {
            trace!(%error, "driver failure after finish ignored");
            return;
        }
        if let Some(state) = self.take_state() {
            self.finish(Item::Failed(error), state);
        }
    }
}

impl<T, A, N> Sink<T> for Run<T, A, N>
where
    A: Clone,
    N: FnMut(Item<T>, A) -> Step<A>,
{
    fn forward(&self, item: Item<T>) -> Step<()> {
        {
            let mut core = self.core.borrow_mut();
            if core.finished {
                trace!("forward after finish ignored");
                return Step::Reduced(());
            }
            if core.busy {
                core.backlog.push_back(item);
                return Step::Continue(());
            }
            core.busy = true;
        }

        let mut item = item;
        loop {
            self.process(item);
            let mut core = self.core.borrow_mut();
            if core.finished {
                core.busy = false;
                return Step::Reduced(());
            }
            match core.backlog.pop_front() {
                Some(queued) => item = queued,
                None => {
                    core.busy = false;
                    return Step::Continue(());
                }
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.core.borrow().finished
    }
}

/// The driver's handle on one reduction run.
///
/// Cloning shares the run. Every method is a no-op once the run has
/// finished; [`forward`](Self::forward) then reports [`Step::Reduced`].
/// Items forwarded from inside the reducer are queued and processed after
/// the current item, in order.
pub struct Forward<T> {
    sink: Rc<dyn Sink<T>>,
}

impl<T> Forward<T> {
    /// Pushes `item` into the run.
    ///
    /// Returns [`Step::Reduced`] once the run has finished, whether this
    /// item finished it or an earlier one did. Drivers should stop then.
    pub fn forward(&self, item: Item<T>) -> Step<()> {
        self.sink.forward(item)
    }

    /// Pushes a value.
    pub fn send(&self, value: T) -> Step<()> {
        self.forward(Item::Value(value))
    }

    /// Ends the run gracefully.
    pub fn end(&self) {
        let _ = self.forward(Item::End);
    }

    /// Fails the run with `error`.
    pub fn fail(&self, error: Error) {
        let _ = self.forward(Item::Failed(error));
    }

    /// Returns true once the run has finished.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sink.is_closed()
    }

    /// Returns true if both handles drive the same run.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.sink, &other.sink)
    }
}

impl<T> Clone for Forward<T> {
    fn clone(&self) -> Self {
        Self {
            sink: Rc::clone(&self.sink),
        }
    }
}

impl<T> fmt::Debug for Forward<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forward")
            .field("closed", &self.is_closed())
            .finish()
    }
}
