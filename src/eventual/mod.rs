//! Eventual values.
//!
//! - [`Eventual`]: A single-assignment value that may not be known yet
//! - [`Delivered`]: A plain value, a rejection, or an eventual
//! - [`when`], [`then`], [`recover`], [`follow`]: Handler attachment

mod delivered;
mod eventual;
mod when;

pub use delivered::{Delivered, IntoDelivered};
pub use eventual::Eventual;
pub use when::{follow, recover, then, when};
