//! Multicast: one source run shared by many reducers.
//!
//! A [`Hub`] wraps a source. Reducing the hub subscribes a consumer; the
//! first consumer opens the source, and every later one joins the run in
//! progress and sees only the items forwarded after it subscribed.
//!
//! ```text
//! closed ──first subscribe──▶ open ──END / last consumer done──▶ closed
//! ```
//!
//! When the last consumer finishes, the hub stops the source with a
//! reduced step and closes; the next subscriber opens it again.

use super::{Forward, Reduce, Reducible, Source};
use crate::tracing_compat::{debug, trace};
use crate::types::{Item, Step};
use core::fmt;
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

struct Inner<T> {
    /// The source while closed, `None` while a run is in progress.
    input: Option<Source<T>>,
    consumers: Vec<Forward<T>>,
}

/// A reducible that many reducers can consume at once.
///
/// # Example
///
/// ```
/// use eventual_reduce::{Hub, collect};
///
/// let hub = Hub::new(vec![1, 2, 3]);
/// let first = collect(hub.clone());
/// let second = collect(hub);
/// assert_eq!(first.settled(), Some(Ok(vec![1, 2, 3])));
/// assert_eq!(second.settled(), Some(Ok(vec![1, 2, 3])));
/// ```
pub struct Hub<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

/// Wraps `source` into a hub. An empty source stays empty.
pub fn hub<T: Clone + 'static>(source: impl Into<Source<T>>) -> Source<T> {
    match source.into() {
        Source::Empty => Source::Empty,
        source => Source::Reducible(Hub::new(source).reducible()),
    }
}

impl<T: Clone + 'static> Hub<T> {
    /// Creates a closed hub over `source`.
    pub fn new(source: impl Into<Source<T>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                input: Some(source.into()),
                consumers: Vec::new(),
            })),
        }
    }

    /// Returns true while the source is running.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.borrow().input.is_none()
    }

    /// Returns the number of subscribed consumers.
    #[must_use]
    pub fn consumers(&self) -> usize {
        self.inner.borrow().consumers.len()
    }

    /// Returns a reducible view; reducing it subscribes to the hub.
    #[must_use]
    pub fn reducible(&self) -> Reducible<T> {
        let hub = self.clone();
        Reducible::new(move |forward| {
            hub.subscribe(forward);
            Ok(())
        })
    }

    fn subscribe(&self, consumer: Forward<T>) {
        let closed = {
            let mut inner = self.inner.borrow_mut();
            inner.consumers.push(consumer);
            inner.input.take()
        };
        if let Some(source) = closed {
            self.open(source);
        }
    }

    fn open(&self, source: Source<T>) {
        debug!("hub opened");
        let hub = self.clone();
        let restore = source.clone();
        let _ = source.reduce(move |item, ()| hub.distribute(item, &restore), ());
    }

    fn distribute(&self, item: Item<T>, source: &Source<T>) -> Step<()> {
        match item {
            Item::End => self.drain(),
            item => self.dispatch(&item),
        }
        let mut inner = self.inner.borrow_mut();
        if inner.consumers.is_empty() {
            if inner.input.is_none() {
                debug!("hub closed");
                inner.input = Some(source.clone());
            }
            Step::Reduced(())
        } else {
            Step::Continue(())
        }
    }

    /// Sends `item` to every consumer subscribed right now.
    fn dispatch(&self, item: &Item<T>) {
        let consumers = self.inner.borrow().consumers.clone();
        for consumer in consumers {
            if consumer.forward(item.clone()).is_reduced() {
                trace!("hub consumer finished");
                self.inner
                    .borrow_mut()
                    .consumers
                    .retain(|other| !other.ptr_eq(&consumer));
            }
        }
    }

    /// Ends every consumer, including ones that subscribe meanwhile.
    fn drain(&self) {
        loop {
            let batch = mem::take(&mut self.inner.borrow_mut().consumers);
            if batch.is_empty() {
                break;
            }
            for consumer in batch {
                consumer.end();
            }
        }
    }
}

impl<T> Clone for Hub<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Hub<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Hub")
                .field("open", &inner.input.is_none())
                .field("consumers", &inner.consumers.len())
                .finish(),
            Err(_) => f.debug_struct("Hub").finish_non_exhaustive(),
        }
    }
}

impl<T: Clone + 'static> Reduce<T> for Hub<T> {
    fn reduce<A, N>(self, next: N, initial: A) -> Option<A>
    where
        A: Clone + 'static,
        N: FnMut(Item<T>, A) -> Step<A> + 'static,
    {
        self.reducible().reduce(next, initial)
    }
}

impl<T: Clone + 'static> From<Hub<T>> for Source<T> {
    fn from(hub: Hub<T>) -> Self {
        Self::Reducible(hub.reducible())
    }
}
