//! The eventual value type.
//!
//! # Delivery
//!
//! An eventual moves through three states:
//!
//! ```text
//! Pending ──deliver──▶ Delivering ──queue drained──▶ Realized(value)
//! ```
//!
//! `Delivering` reads as pending, so observers registered by other
//! observers while the queue drains are queued behind everything already
//! waiting instead of firing early. It also rejects further deliveries,
//! which makes `deliver` safe to call re-entrantly.
//!
//! Observers are not called with the delivered value directly: each one
//! is forwarded to it with [`Delivered::await_with`]. Delivering another
//! pending eventual therefore moves the observers onto that eventual, and
//! they fire when the whole chain settles.

use super::Delivered;
use crate::error::{Error, Result};
use crate::pending::Observer;
use crate::tracing_compat::{debug, trace, warn};
use crate::types::EventualId;
use core::fmt;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Observers fired per drain batch before spilling to the heap.
const INLINE_BATCH: usize = 4;

enum State<T> {
    Pending,
    Delivering,
    Realized(Delivered<T>),
}

struct Inner<T> {
    id: EventualId,
    state: State<T>,
    observers: VecDeque<Observer<T>>,
}

/// A single-assignment value that may not be known yet.
///
/// Handles are cheap to clone and compare by identity. The value is set
/// once with [`deliver`](Self::deliver); later deliveries are ignored.
///
/// # Example
///
/// ```
/// use eventual_reduce::{Delivered, Eventual, then};
///
/// let price = Eventual::new();
/// let with_tax = then(&price, |p: u32| Ok(p + p / 10));
/// assert!(with_tax.is_pending());
///
/// price.deliver(Delivered::Plain(100));
/// assert_eq!(with_tax.settled(), Some(Ok(110)));
/// ```
pub struct Eventual<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: Clone + 'static> Eventual<T> {
    /// Creates a pending eventual with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                id: EventualId::next(),
                state: State::Pending,
                observers: VecDeque::new(),
            })),
        }
    }

    /// Creates an eventual already realized with `value`.
    #[must_use]
    pub fn realized(value: T) -> Self {
        let eventual = Self::new();
        eventual.deliver(Delivered::Plain(value));
        eventual
    }

    /// Creates an eventual already rejected with `error`.
    #[must_use]
    pub fn rejected(error: Error) -> Self {
        let eventual = Self::new();
        eventual.deliver(Delivered::Rejected(error));
        eventual
    }

    /// Returns the diagnostic identifier.
    #[must_use]
    pub fn id(&self) -> EventualId {
        self.inner.borrow().id
    }

    /// Returns true until the eventual is realized.
    ///
    /// Stays true while a delivery is draining observers.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !matches!(self.inner.borrow().state, State::Realized(_))
    }

    /// Returns true if both handles refer to the same eventual.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the settled value without registering an observer.
    ///
    /// `None` while this eventual, or anything it forwards to, is pending.
    #[must_use]
    pub fn settled(&self) -> Option<Result<T>> {
        let value = match &self.inner.borrow().state {
            State::Realized(value) => value.clone(),
            State::Pending | State::Delivering => return None,
        };
        value.settled()
    }

    /// Registers `observer` for the settled value.
    ///
    /// While pending, the observer is queued in FIFO order. Once realized,
    /// the observer is forwarded to the realized value, which fires it
    /// immediately unless that value is itself a pending eventual.
    pub fn await_with(&self, observer: Observer<T>) {
        let realized = {
            let mut inner = self.inner.borrow_mut();
            let realized = match &inner.state {
                State::Realized(value) => Some(value.clone()),
                State::Pending | State::Delivering => None,
            };
            if realized.is_none() {
                trace!(eventual = %inner.id, queued = inner.observers.len(), "observer queued");
                inner.observers.push_back(observer);
                return;
            }
            realized
        };
        if let Some(value) = realized {
            value.await_with(observer);
        }
    }

    /// Registers a closure for the settled value.
    pub fn on_settle(&self, observer: impl FnOnce(Result<T>) + 'static) {
        self.await_with(Box::new(observer));
    }

    /// Delivers `value`, realizing this eventual.
    ///
    /// Ignored when the eventual is already realized, when a delivery is
    /// in progress, or when `value` is this eventual (directly or through
    /// eventuals it was realized with). Queued observers fire in
    /// registration order, including observers registered while the queue
    /// drains. An observer that panics is logged and skipped; the rest of
    /// the queue still fires and the eventual still realizes.
    pub fn deliver(&self, value: impl Into<Delivered<T>>) {
        let value = value.into();
        if value.forwards_to(self) {
            trace!(eventual = %self.id(), "self delivery ignored");
            return;
        }
        let id = {
            let mut inner = self.inner.borrow_mut();
            if !matches!(inner.state, State::Pending) {
                trace!(eventual = %inner.id, "delivery ignored: not pending");
                return;
            }
            inner.state = State::Delivering;
            inner.id
        };

        let mut batches = 0usize;
        let mut fired = 0usize;
        loop {
            let batch: SmallVec<[Observer<T>; INLINE_BATCH]> = {
                let mut inner = self.inner.borrow_mut();
                if inner.observers.is_empty() {
                    inner.state = State::Realized(value);
                    break;
                }
                mem::take(&mut inner.observers).into_iter().collect()
            };
            batches += 1;
            fired += batch.len();
            for observer in batch {
                let fired = panic::catch_unwind(AssertUnwindSafe(|| value.await_with(observer)));
                if let Err(payload) = fired {
                    #[cfg_attr(not(feature = "tracing-integration"), allow(unused_variables))]
                    let error = Error::from_panic(payload);
                    warn!(eventual = %id, %error, "observer panicked during delivery");
                }
            }
        }
        debug!(eventual = %id, batches, observers = fired, "eventual realized");
    }

    /// Returns true if waiting on `self` ends up waiting on `target`.
    pub(crate) fn forwards_to(&self, target: &Self) -> bool {
        let mut current = self.clone();
        loop {
            if current.ptr_eq(target) {
                return true;
            }
            let next = match &current.inner.borrow().state {
                State::Realized(Delivered::Eventual(next)) => next.clone(),
                _ => return false,
            };
            current = next;
        }
    }
}

impl<T: Clone + 'static> Default for Eventual<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Eventual<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Eventual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => {
                let state = match inner.state {
                    State::Pending => "pending",
                    State::Delivering => "delivering",
                    State::Realized(_) => "realized",
                };
                f.debug_struct("Eventual")
                    .field("id", &inner.id)
                    .field("state", &state)
                    .field("observers", &inner.observers.len())
                    .finish()
            }
            Err(_) => f.debug_struct("Eventual").finish_non_exhaustive(),
        }
    }
}
