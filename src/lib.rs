//! # Millrace
//!
//! > *A millrace is the channel that carries water to the wheel.*
//!
//! A Rust library for composing fallible, potentially streaming operations
//! into short-circuiting pipelines without raising faults for expected
//! failures.
//!
//! ## The pieces
//!
//! - [`Either`] / [`Maybe`]: total tagged unions; `Left` is an expected
//!   failure that flows as a value, never a panic.
//! - [`AsyncEither`]: a deferred, memoized `Either` computation with lazy
//!   chainable combinators and a configured default failure for caught
//!   panics.
//! - [`iter`]: synchronous pull-based combinators (`map`, `filter`,
//!   `reduce`, `find`, `includes`, `concat`) over anything `IntoIterator`.
//! - [`stream`]: their asynchronous analogues over [`futures::Stream`],
//!   plus [`stream::capture`] for turning source faults into in-band
//!   `Left` items and [`stream::stateful_map`] for threading an accumulator
//!   across a stream.
//!
//! ## Quick Example
//!
//! ```rust
//! use futures::stream::{self, StreamExt};
//! use millrace::{stream as mstream, AsyncEither, Either};
//!
//! # tokio_test::block_on(async {
//! // A fallible source: the third pull fails.
//! let source = stream::iter(vec![Ok(1), Ok(2), Err("cursor lost")]);
//!
//! // Faults become in-band Left items; Right items keep flowing.
//! let items = mstream::capture(source, |fault| format!("fetch failed: {fault}"));
//! let doubled = mstream::either_map(items, |n| async move { n * 2 });
//!
//! let collected: Vec<Either<String, i32>> = doubled.collect().await;
//! assert_eq!(collected[0], Either::right(2));
//! assert_eq!(collected[1], Either::right(4));
//! assert!(collected[2].is_left());
//!
//! // A lazy, short-circuiting effect chain.
//! let checked = AsyncEither::right(42u32, "internal error".to_string())
//!     .filter(|n| *n > 10, "too small".to_string())
//!     .map(|n| n + 1);
//! assert_eq!(checked.join().await, Either::right(43));
//! # });
//! ```
//!
//! ## Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Either`] and [`Maybe`].
//! - `tracing`: debug events at the fault-conversion boundaries.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod async_either;
pub mod either;
pub mod iter;
pub mod maybe;
pub mod stream;

// Re-exports
pub use async_either::{AsyncEither, FullJoinError};
pub use either::Either;
pub use maybe::Maybe;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::async_either::{AsyncEither, FullJoinError};
    pub use crate::either::Either;
    pub use crate::maybe::Maybe;
    pub use crate::stream::{FinalState, StatefulError};
}
