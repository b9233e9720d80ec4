//! Reducible sources and the reduce protocol.
//!
//! A reduction folds a source into an accumulated state with a reducer
//! `next(item, state) -> Step`. The reducer sees [`Item::Value`]s, then one
//! terminal call: [`END`](crate::END) on completion, [`Item::Failed`] on
//! error. Returning a reduced step stops the source early.
//!
//! # Sources
//!
//! - [`Source`]: The closed set of sources (empty, indexed, singular,
//!   failed, reducible)
//! - [`Reducible`]: Push-driven sources with a driver function
//! - [`iter`]: Reducibles over re-iterable collections
//! - [`Hub`]: One source run shared by many reducers
//!
//! # Consumers
//!
//! - [`reduce`]: Fold any source
//! - [`collect`]: Collect into an eventual vector
//!
//! [`Item::Value`]: crate::Item::Value
//! [`Item::Failed`]: crate::Item::Failed

mod collect;
mod fold;
mod hub;
mod iter;
mod reduce;
mod reducible;
mod source;

pub use collect::collect;
pub use hub::{Hub, hub};
pub use iter::iter;
pub use reduce::{Reduce, reduce};
pub use reducible::{Forward, Reducible, reducible};
pub use source::Source;
