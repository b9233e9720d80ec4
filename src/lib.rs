//! Eventual-reduce: single-assignment values and push-driven reductions.
//!
//! # Overview
//!
//! Two small primitives for in-process, single-threaded asynchronous code.
//! Neither spawns threads or blocks; "waiting" means registering a
//! continuation that fires when some caller delivers a value or pushes an
//! item.
//!
//! # Core Guarantees
//!
//! - **Single assignment**: An eventual is delivered once; later deliveries are ignored
//! - **FIFO observers**: Observers fire once each, in registration order, including
//!   observers registered while a delivery is in progress
//! - **Transitive forwarding**: Delivering an eventual into an eventual chains them
//! - **Errors as values**: Rejections and failed items travel the value channel;
//!   handler panics become rejections, and a reducer panic on a pushed value fails
//!   its run
//! - **One terminal call**: Every reduction ends with exactly one `END`, failure, or
//!   reduced step, however irregular the source
//!
//! # Module Structure
//!
//! - [`eventual`]: `Eventual`, `Delivered`, and the `when` family
//! - [`pending`]: The pending/await/deliver protocol as a trait
//! - [`combinator`]: `group`, `apply`, `decorate`
//! - [`stream`]: Sources, `reduce`, `Reducible`, `Hub`
//! - [`types`]: Items, steps, identifiers
//! - [`error`](mod@error): Error types
//! - [`tracing_compat`]: Optional tracing integration (requires `tracing-integration` feature)

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_inception)]
#![allow(clippy::doc_markdown)]

pub mod combinator;
pub mod error;
pub mod eventual;
pub mod pending;
pub mod stream;
pub mod tracing_compat;
pub mod types;

// ── Test-only modules ───────────────────────────────────────────────────
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

// Re-exports for convenient access to core types
pub use combinator::{apply, apply_eventual, decorate, decorate2, group};
pub use error::{Error, ErrorKind, Result};
pub use eventual::{Delivered, Eventual, IntoDelivered, follow, recover, then, when};
pub use pending::{Observer, Pending, await_value, deliver, is_pending};
pub use stream::{
    Forward, Hub, Reduce, Reducible, Source, collect, hub, iter, reduce, reducible,
};
pub use types::{END, EventualId, Item, MaybeError, Step, is_error, is_reduced, reduced};
