//! Combinators over possibly-pending values.
//!
//! This module provides the combinators built on [`when`](crate::when):
//!
//! - [`group`]: Collect many values into one ordered vector
//! - [`apply`]: Call a function once its arguments settle
//! - [`apply_eventual`]: Same, with a function that may itself be pending
//! - [`decorate`]: Lift a function over a vector of pending arguments
//! - [`decorate2`]: Lift a two-argument function with mixed types
//!
//! Every combinator returns its result directly when all inputs are
//! already settled and rejects with the first rejection in argument order.

pub mod apply;
pub mod group;

pub use apply::{apply, apply_eventual, decorate, decorate2};
pub use group::group;
