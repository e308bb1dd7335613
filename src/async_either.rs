//! A deferred, memoized, chainable [`Either`] computation.
//!
//! `AsyncEither<L, R>` wraps a pending computation that will eventually
//! resolve to an `Either<L, R>`. Combinators ([`map`](AsyncEither::map),
//! [`flat_map`](AsyncEither::flat_map), [`filter`](AsyncEither::filter),
//! [`tap`](AsyncEither::tap)) compose eagerly, each call building a new
//! deferred pipeline immediately, but nothing executes until a terminal
//! call ([`join`](AsyncEither::join) or [`full_join`](AsyncEither::full_join))
//! polls the pipeline. The resolved result is memoized, so repeated terminal
//! calls re-read the cached value instead of re-running side effects.
//!
//! # Fault handling
//!
//! Every instance carries a *default left*: the failure value substituted
//! when a caller-supplied function panics. Panics are caught at the
//! combinator boundary and never escape a terminal call; expected failures
//! are always `Left` values, never panics. Once a chain resolves to `Left`,
//! no later caller-supplied function runs at all.
//!
//! # Example
//!
//! ```rust
//! use millrace::{AsyncEither, Either};
//!
//! # tokio_test::block_on(async {
//! let pipeline = AsyncEither::right(4u32, "internal error")
//!     .map(|n| n * 10)
//!     .filter(|n| *n > 20, "too small")
//!     .map(|n| n + 2);
//!
//! assert_eq!(pipeline.join().await, Either::right(42));
//!
//! let rejected = AsyncEither::right(1u32, "internal error")
//!     .filter(|n| *n > 20, "too small")
//!     .map(|n| n + 2); // never runs
//!
//! assert_eq!(rejected.join().await, Either::left("too small"));
//! # });
//! ```

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::Either;

/// A deferred computation resolving to an [`Either`], with a configured
/// default failure value for caught panics.
///
/// Cloning an `AsyncEither` rewraps the same underlying pipeline: both
/// handles share one memoized result, and the pipeline body still runs at
/// most once across all of them.
///
/// # Contract notes
///
/// The pipeline body runs exactly once, on the first terminal call; later
/// terminal calls observe the cached `Either`. Callers expecting a second
/// `join` to re-run side effects are relying on behavior this type does not
/// provide; that expectation is a caller error, not something defended
/// against at runtime.
#[derive(Clone)]
pub struct AsyncEither<L, R> {
    pipeline: Shared<BoxFuture<'static, Either<L, R>>>,
    default_left: L,
}

impl<L, R> std::fmt::Debug for AsyncEither<L, R>
where
    L: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncEither")
            .field("pipeline", &"<deferred>")
            .field("default_left", &self.default_left)
            .finish()
    }
}

impl<L, R> AsyncEither<L, R>
where
    L: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    // ========== Construction ==========

    /// Wrap an already-resolved `Either`.
    ///
    /// `default_left` is the failure value substituted if a later combinator
    /// step panics.
    ///
    /// ```rust
    /// use millrace::{AsyncEither, Either};
    ///
    /// # tokio_test::block_on(async {
    /// let ae = AsyncEither::from_either(Either::<&str, _>::right(3), "oops");
    /// assert_eq!(ae.join().await, Either::right(3));
    /// # });
    /// ```
    pub fn from_either(value: Either<L, R>, default_left: L) -> Self {
        AsyncEither {
            pipeline: async move { value }.boxed().shared(),
            default_left,
        }
    }

    /// Wrap a pending computation.
    ///
    /// The future is not polled until a terminal call. A panic inside it is
    /// caught and becomes `Left(default_left)`.
    ///
    /// ```rust
    /// use millrace::{AsyncEither, Either};
    ///
    /// # tokio_test::block_on(async {
    /// let ae = AsyncEither::from_future(
    ///     async { Either::<&str, _>::right(21) },
    ///     "fetch failed",
    /// );
    /// assert_eq!(ae.map(|n| n * 2).join().await, Either::right(42));
    /// # });
    /// ```
    pub fn from_future<Fut>(future: Fut, default_left: L) -> Self
    where
        Fut: Future<Output = Either<L, R>> + Send + 'static,
    {
        let fallback = default_left.clone();
        let pipeline = AssertUnwindSafe(future)
            .catch_unwind()
            .map(move |outcome| match outcome {
                Ok(either) => either,
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("panic in deferred computation, substituting default left");
                    Either::Left(fallback)
                }
            })
            .boxed()
            .shared();

        AsyncEither {
            pipeline,
            default_left,
        }
    }

    /// Wrap an immediate success value.
    pub fn right(value: R, default_left: L) -> Self {
        AsyncEither::from_either(Either::Right(value), default_left)
    }

    /// Wrap an immediate failure value.
    ///
    /// The failure doubles as the default left; no combinator step will ever
    /// run on this chain, so the default is never consulted.
    pub fn left(value: L) -> Self {
        let default_left = value.clone();
        AsyncEither::from_either(Either::Left(value), default_left)
    }

    // ========== Combinators ==========

    /// Transform the `Right` payload with a synchronous function.
    ///
    /// `Left` passes through unchanged and `f` does not run. A panic inside
    /// `f` becomes the configured default left.
    pub fn map<R2, F>(self, f: F) -> AsyncEither<L, R2>
    where
        R2: Clone + Send + Sync + 'static,
        F: FnOnce(R) -> R2 + Send + 'static,
    {
        let default_left = self.default_left.clone();
        let fallback = self.default_left;
        let upstream = self.pipeline;

        let pipeline = async move {
            match upstream.await {
                Either::Left(l) => Either::Left(l),
                Either::Right(r) => match std::panic::catch_unwind(AssertUnwindSafe(move || f(r)))
                {
                    Ok(value) => Either::Right(value),
                    Err(_) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!("panic in map step, substituting default left");
                        Either::Left(fallback)
                    }
                },
            }
        }
        .boxed()
        .shared();

        AsyncEither {
            pipeline,
            default_left,
        }
    }

    /// Transform the `Right` payload with a future-returning function.
    ///
    /// Same contract as [`map`](AsyncEither::map); the panic guard covers
    /// both the call and the awaited future.
    pub fn map_async<R2, F, Fut>(self, f: F) -> AsyncEither<L, R2>
    where
        R2: Clone + Send + Sync + 'static,
        F: FnOnce(R) -> Fut + Send + 'static,
        Fut: Future<Output = R2> + Send + 'static,
    {
        let default_left = self.default_left.clone();
        let fallback = self.default_left;
        let upstream = self.pipeline;

        let pipeline = async move {
            match upstream.await {
                Either::Left(l) => Either::Left(l),
                Either::Right(r) => {
                    match AssertUnwindSafe(async move { f(r).await })
                        .catch_unwind()
                        .await
                    {
                        Ok(value) => Either::Right(value),
                        Err(_) => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!("panic in map_async step, substituting default left");
                            Either::Left(fallback)
                        }
                    }
                }
            }
        }
        .boxed()
        .shared();

        AsyncEither {
            pipeline,
            default_left,
        }
    }

    /// Chain a step that yields another `AsyncEither`, flattening one level.
    ///
    /// Once the chain is `Left`, `f` is never invoked. The resulting chain
    /// keeps this instance's default left for its own later steps.
    ///
    /// ```rust
    /// use millrace::{AsyncEither, Either};
    ///
    /// # tokio_test::block_on(async {
    /// fn fetch(id: u32) -> AsyncEither<&'static str, String> {
    ///     AsyncEither::right(format!("resource-{id}"), "fetch failed")
    /// }
    ///
    /// let found = AsyncEither::right(7u32, "oops").flat_map(fetch);
    /// assert_eq!(found.join().await, Either::right("resource-7".to_string()));
    ///
    /// let denied = AsyncEither::<&str, u32>::left("denied").flat_map(fetch);
    /// assert_eq!(denied.join().await, Either::left("denied"));
    /// # });
    /// ```
    pub fn flat_map<R2, F>(self, f: F) -> AsyncEither<L, R2>
    where
        R2: Clone + Send + Sync + 'static,
        F: FnOnce(R) -> AsyncEither<L, R2> + Send + 'static,
    {
        let default_left = self.default_left.clone();
        let fallback = self.default_left;
        let upstream = self.pipeline;

        let pipeline = async move {
            match upstream.await {
                Either::Left(l) => Either::Left(l),
                Either::Right(r) => match std::panic::catch_unwind(AssertUnwindSafe(move || f(r)))
                {
                    Ok(next) => next.pipeline.await,
                    Err(_) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!("panic in flat_map step, substituting default left");
                        Either::Left(fallback)
                    }
                },
            }
        }
        .boxed()
        .shared();

        AsyncEither {
            pipeline,
            default_left,
        }
    }

    /// Chain a step that yields a plain `Either`.
    ///
    /// The `Either`-returning flavor of [`flat_map`](AsyncEither::flat_map).
    pub fn and_then<R2, F>(self, f: F) -> AsyncEither<L, R2>
    where
        R2: Clone + Send + Sync + 'static,
        F: FnOnce(R) -> Either<L, R2> + Send + 'static,
    {
        let default_left = self.default_left.clone();
        let fallback = self.default_left;
        let upstream = self.pipeline;

        let pipeline = async move {
            match upstream.await {
                Either::Left(l) => Either::Left(l),
                Either::Right(r) => match std::panic::catch_unwind(AssertUnwindSafe(move || f(r)))
                {
                    Ok(either) => either,
                    Err(_) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!("panic in and_then step, substituting default left");
                        Either::Left(fallback)
                    }
                },
            }
        }
        .boxed()
        .shared();

        AsyncEither {
            pipeline,
            default_left,
        }
    }

    /// Reject `Right` values failing the predicate with `Left(error_value)`.
    ///
    /// `Left` values and passing `Right` values are unchanged.
    pub fn filter<P>(self, predicate: P, error_value: L) -> Self
    where
        P: FnOnce(&R) -> bool + Send + 'static,
    {
        let default_left = self.default_left.clone();
        let fallback = self.default_left;
        let upstream = self.pipeline;

        let pipeline = async move {
            match upstream.await {
                Either::Left(l) => Either::Left(l),
                Either::Right(r) => {
                    match std::panic::catch_unwind(AssertUnwindSafe(|| predicate(&r))) {
                        Ok(true) => Either::Right(r),
                        Ok(false) => Either::Left(error_value),
                        Err(_) => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!("panic in filter predicate, substituting default left");
                            Either::Left(fallback)
                        }
                    }
                }
            }
        }
        .boxed()
        .shared();

        AsyncEither {
            pipeline,
            default_left,
        }
    }

    /// Run a side effect on the `Right` payload; the value passes through
    /// unchanged.
    ///
    /// Skipped entirely for `Left`. A panic inside `f` becomes the default
    /// left, same as [`map`](AsyncEither::map).
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&R) + Send + 'static,
    {
        let default_left = self.default_left.clone();
        let fallback = self.default_left;
        let upstream = self.pipeline;

        let pipeline = async move {
            match upstream.await {
                Either::Left(l) => Either::Left(l),
                Either::Right(r) => match std::panic::catch_unwind(AssertUnwindSafe(|| f(&r))) {
                    Ok(()) => Either::Right(r),
                    Err(_) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!("panic in tap step, substituting default left");
                        Either::Left(fallback)
                    }
                },
            }
        }
        .boxed()
        .shared();

        AsyncEither {
            pipeline,
            default_left,
        }
    }

    /// Run an asynchronous side effect on a clone of the `Right` payload.
    pub fn tap_async<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(R) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let default_left = self.default_left.clone();
        let fallback = self.default_left;
        let upstream = self.pipeline;

        let pipeline = async move {
            match upstream.await {
                Either::Left(l) => Either::Left(l),
                Either::Right(r) => {
                    let observed = r.clone();
                    match AssertUnwindSafe(async move { f(observed).await })
                        .catch_unwind()
                        .await
                    {
                        Ok(()) => Either::Right(r),
                        Err(_) => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!("panic in tap_async step, substituting default left");
                            Either::Left(fallback)
                        }
                    }
                }
            }
        }
        .boxed()
        .shared();

        AsyncEither {
            pipeline,
            default_left,
        }
    }

    // ========== Terminals ==========

    /// Force the pipeline and resolve to the plain `Either`. Never panics.
    ///
    /// The first call runs the pipeline body; later calls (on this handle or
    /// any clone) return the memoized result without re-running side effects.
    pub async fn join(&self) -> Either<L, R> {
        self.pipeline.clone().await
    }

    /// Force the pipeline and unwrap the `Right` payload.
    ///
    /// Callers reach for `full_join` once upstream filtering has already
    /// eliminated `Left` states. If the chain is still `Left` here, that is
    /// reported as the distinguishable [`FullJoinError`] carrying the left
    /// payload, never a panic.
    ///
    /// ```rust
    /// use millrace::AsyncEither;
    ///
    /// # tokio_test::block_on(async {
    /// let ok = AsyncEither::right(42, "oops");
    /// assert_eq!(ok.full_join().await, Ok(42));
    ///
    /// let denied = AsyncEither::<&str, i32>::left("denied");
    /// let err = denied.full_join().await.unwrap_err();
    /// assert_eq!(err.left, "denied");
    /// # });
    /// ```
    pub async fn full_join(&self) -> Result<R, FullJoinError<L>> {
        match self.join().await {
            Either::Right(r) => Ok(r),
            Either::Left(l) => Err(FullJoinError::new(l)),
        }
    }
}

/// Error returned when [`AsyncEither::full_join`] resolves on a chain that is
/// still `Left`.
///
/// Carries the left payload so the caller can still inspect the failure it
/// neglected to filter out upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullJoinError<L> {
    /// The left payload the chain resolved to.
    pub left: L,
}

impl<L> FullJoinError<L> {
    /// Create a new `FullJoinError`.
    pub fn new(left: L) -> Self {
        Self { left }
    }

    /// Extract the left payload.
    pub fn into_left(self) -> L {
        self.left
    }

    /// Get a reference to the left payload.
    pub fn left(&self) -> &L {
        &self.left
    }
}

impl<L: std::fmt::Display> std::fmt::Display for FullJoinError<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "full_join resolved to a left value: {}", self.left)
    }
}

impl<L: std::error::Error + 'static> std::error::Error for FullJoinError<L> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.left)
    }
}
