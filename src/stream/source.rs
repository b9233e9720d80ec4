//! The closed set of reducible sources.

use super::fold::{fold_empty, fold_failed, fold_items, fold_singular};
use super::{Reduce, Reducible};
use crate::error::Error;
use crate::types::{Item, Step};

/// Anything `reduce` knows how to fold.
///
/// | Variant | Calls to the reducer |
/// |---|---|
/// | `Empty` | `END` |
/// | `Indexed` | each item in order, then `END` |
/// | `Singular` | the value, then `END`, even if the value reduced |
/// | `Failed` | the error |
/// | `Reducible` | whatever the driver forwards |
///
/// Indexed sources stop early at an embedded `END` or failure and on a
/// reduced step, without a trailing `END`.
#[derive(Debug, Clone)]
pub enum Source<T> {
    /// No items at all.
    Empty,
    /// A finite, ordered sequence of items.
    Indexed(Vec<Item<T>>),
    /// A single value.
    Singular(T),
    /// A source that is itself a failure.
    Failed(Error),
    /// A push-driven source.
    Reducible(Reducible<T>),
}

impl<T> Source<T> {
    /// An indexed source over plain values.
    pub fn indexed(values: impl IntoIterator<Item = T>) -> Self {
        Self::Indexed(values.into_iter().map(Item::Value).collect())
    }

    /// An indexed source over items, which may include failures.
    pub fn items(items: impl IntoIterator<Item = Item<T>>) -> Self {
        Self::Indexed(items.into_iter().collect())
    }

    /// Returns true for [`Source::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl<T> Default for Source<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> From<Vec<T>> for Source<T> {
    fn from(values: Vec<T>) -> Self {
        Self::indexed(values)
    }
}

impl<T> From<Option<T>> for Source<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Self::Singular)
    }
}

impl<T> From<Error> for Source<T> {
    fn from(error: Error) -> Self {
        Self::Failed(error)
    }
}

impl<T> From<Reducible<T>> for Source<T> {
    fn from(reducible: Reducible<T>) -> Self {
        Self::Reducible(reducible)
    }
}

impl<T: Clone + 'static> Reduce<T> for Source<T> {
    fn reduce<A, N>(self, next: N, initial: A) -> Option<A>
    where
        A: Clone + 'static,
        N: FnMut(Item<T>, A) -> Step<A> + 'static,
    {
        match self {
            Self::Empty => Some(fold_empty(next, initial)),
            Self::Indexed(items) => Some(fold_items(items, next, initial)),
            Self::Singular(value) => Some(fold_singular(value, next, initial)),
            Self::Failed(error) => Some(fold_failed(error, next, initial)),
            Self::Reducible(reducible) => reducible.reduce(next, initial),
        }
    }
}
