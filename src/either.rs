//! A tagged union for expected failures that never panics.
//!
//! `Either<L, R>` is the value type at the bottom of every pipeline in this
//! crate. By convention it is failure-biased on the left: `Left` carries an
//! expected domain error (a denied permission, a missing resource), `Right`
//! carries the happy-path value. Every operation is total: nothing here
//! panics, and there are deliberately no `unwrap`-style extractors. The only
//! escape hatches are fallback-taking ones like [`Either::right_or`].
//!
//! # Either vs Result
//!
//! `Result` is the right tool when a fault should unwind through `?`.
//! `Either` is the right tool when a failure is an ordinary value that flows
//! through a pipeline: it can sit inside a stream element, be filtered on,
//! and be inspected without ever being "thrown". The [`crate::stream`]
//! combinators rely on exactly that: a `Left` item rides along in-band
//! instead of terminating the sequence.
//!
//! # Examples
//!
//! ```rust
//! use millrace::Either;
//!
//! #[derive(Debug, PartialEq)]
//! struct Denied(&'static str);
//!
//! fn check_access(is_admin: bool) -> Either<Denied, u32> {
//!     if is_admin {
//!         Either::right(7)
//!     } else {
//!         Either::left(Denied("admin only"))
//!     }
//! }
//!
//! let granted = check_access(true)
//!     .map(|clearance| clearance + 1)
//!     .right_or(0);
//! assert_eq!(granted, 8);
//!
//! let denied = check_access(false).map(|clearance| clearance + 1);
//! assert_eq!(denied, Either::left(Denied("admin only")));
//! ```

use crate::Maybe;

/// A value that is either `Left(L)` (expected failure) or `Right(R)` (success).
///
/// Right-biased: [`map`](Either::map) and [`and_then`](Either::and_then)
/// operate on the `Right` variant and pass `Left` through unchanged, so a
/// chain of operations short-circuits at the first failure without running
/// any later step.
///
/// The discriminant and the populated payload always agree; the type cannot
/// be constructed with both or neither.
///
/// # Example
///
/// ```rust
/// use millrace::Either;
///
/// let fetched: Either<&str, i32> = Either::right(21);
/// let missing: Either<&str, i32> = Either::left("not found");
///
/// assert_eq!(fetched.map(|n| n * 2), Either::right(42));
/// assert_eq!(missing.map(|n| n * 2), Either::left("not found"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The failure branch.
    Left(L),
    /// The success branch.
    Right(R),
}

impl<L, R> Either<L, R> {
    // ========== Constructors ==========

    /// Create a `Left` value.
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// let e: Either<&str, i32> = Either::left("no such event");
    /// assert!(e.is_left());
    /// ```
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a `Right` value.
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(42);
    /// assert!(e.is_right());
    /// ```
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Lift a `Maybe` into an `Either`, using `left_value` for the absent case.
    ///
    /// ```rust
    /// use millrace::{Either, Maybe};
    ///
    /// assert_eq!(Either::from_maybe(Maybe::some(3), "missing"), Either::right(3));
    /// assert_eq!(Either::from_maybe(Maybe::<i32>::none(), "missing"), Either::left("missing"));
    /// ```
    #[inline]
    pub fn from_maybe(maybe: Maybe<R>, left_value: L) -> Self {
        match maybe {
            Maybe::Some(value) => Either::Right(value),
            Maybe::None => Either::Left(left_value),
        }
    }

    /// Create from a `Result` (`Ok` becomes `Right`, `Err` becomes `Left`).
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    // ========== Transformations ==========

    /// Transform the `Right` payload, passing `Left` through unchanged.
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(10);
    /// assert_eq!(e.map(|n| n + 1), Either::right(11));
    ///
    /// let e: Either<&str, i32> = Either::left("denied");
    /// assert_eq!(e.map(|n| n + 1), Either::left("denied"));
    /// ```
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform the `Left` payload, passing `Right` through unchanged.
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// let e: Either<i32, &str> = Either::left(404);
    /// assert_eq!(e.map_left(|code| code + 100), Either::left(504));
    /// ```
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform both payloads at once.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, on_left: F, on_right: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(on_left(l)),
            Either::Right(r) => Either::Right(on_right(r)),
        }
    }

    /// Chain a fallible step on the `Right` payload (right-biased flat map).
    ///
    /// Once `Left`, no later step runs.
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// fn halve(n: i32) -> Either<&'static str, i32> {
    ///     if n % 2 == 0 { Either::right(n / 2) } else { Either::left("odd") }
    /// }
    ///
    /// assert_eq!(Either::<&str, _>::right(8).and_then(halve), Either::right(4));
    /// assert_eq!(Either::<&str, _>::right(3).and_then(halve), Either::left("odd"));
    /// assert_eq!(Either::left("denied").and_then(halve), Either::left("denied"));
    /// ```
    #[inline]
    pub fn and_then<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    /// Recover from a `Left` payload, passing `Right` through unchanged.
    #[inline]
    pub fn or_else<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> Either<L2, R>,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    // ========== Unwrap with fallback ==========

    /// Return the `Right` payload or a fallback.
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// assert_eq!(Either::<&str, i32>::right(42).right_or(0), 42);
    /// assert_eq!(Either::<&str, i32>::left("denied").right_or(0), 0);
    /// ```
    #[inline]
    pub fn right_or(self, default: R) -> R {
        match self {
            Either::Left(_) => default,
            Either::Right(r) => r,
        }
    }

    /// Return the `Right` payload or compute a fallback from the `Left` one.
    #[inline]
    pub fn right_or_else<F>(self, f: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => r,
        }
    }

    /// Return the `Left` payload or a fallback.
    #[inline]
    pub fn left_or(self, default: L) -> L {
        match self {
            Either::Left(l) => l,
            Either::Right(_) => default,
        }
    }

    // ========== Folding ==========

    /// Collapse both variants into a single value.
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(42);
    /// let msg = e.fold(|err| format!("failed: {err}"), |n| format!("got {n}"));
    /// assert_eq!(msg, "got 42");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    // ========== Borrowing and extraction ==========

    /// Convert to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Convert to `Either<&mut L, &mut R>`.
    #[inline]
    pub fn as_mut(&mut self) -> Either<&mut L, &mut R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Extract the `Left` payload if present, consuming self.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Extract the `Right` payload if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    // ========== Conversions ==========

    /// Convert to `Result` (`Right` becomes `Ok`, `Left` becomes `Err`).
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// assert_eq!(Either::<&str, i32>::right(42).into_result(), Ok(42));
    /// assert_eq!(Either::<&str, i32>::left("denied").into_result(), Err("denied"));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }
}

impl<L, R> Either<L, Either<L, R>> {
    /// Flatten one level of nesting.
    ///
    /// ```rust
    /// use millrace::Either;
    ///
    /// let nested: Either<&str, Either<&str, i32>> = Either::right(Either::right(42));
    /// assert_eq!(nested.flatten(), Either::right(42));
    ///
    /// let inner: Either<&str, Either<&str, i32>> = Either::right(Either::left("inner"));
    /// assert_eq!(inner.flatten(), Either::left("inner"));
    /// ```
    #[inline]
    pub fn flatten(self) -> Either<L, R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(inner) => inner,
        }
    }
}

// ========== Trait Implementations ==========

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        Either::from_result(result)
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}

// ========== Collection Utilities ==========

/// Split an iterator of `Either` into its failures and successes.
///
/// Per-item `Either` streams end up here once fully drained: failures in one
/// bucket, successes in the other, each in original order.
///
/// # Example
///
/// ```rust
/// use millrace::either::{partition, Either};
///
/// let items = vec![
///     Either::right("a"),
///     Either::left(404),
///     Either::right("b"),
/// ];
///
/// let (failures, successes) = partition(items);
/// assert_eq!(failures, vec![404]);
/// assert_eq!(successes, vec!["a", "b"]);
/// ```
pub fn partition<L, R, I>(iter: I) -> (Vec<L>, Vec<R>)
where
    I: IntoIterator<Item = Either<L, R>>,
{
    let mut failures = Vec::new();
    let mut successes = Vec::new();

    for item in iter {
        match item {
            Either::Left(l) => failures.push(l),
            Either::Right(r) => successes.push(r),
        }
    }

    (failures, successes)
}

/// Extract the `Left` payloads from an iterator of `Either`.
pub fn lefts<L, R, I>(iter: I) -> impl Iterator<Item = L>
where
    I: IntoIterator<Item = Either<L, R>>,
{
    iter.into_iter().filter_map(Either::into_left)
}

/// Extract the `Right` payloads from an iterator of `Either`.
pub fn rights<L, R, I>(iter: I) -> impl Iterator<Item = R>
where
    I: IntoIterator<Item = Either<L, R>>,
{
    iter.into_iter().filter_map(Either::into_right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_and_predicates() {
        let l: Either<&str, i32> = Either::left("denied");
        let r: Either<&str, i32> = Either::right(42);

        assert!(l.is_left());
        assert!(!l.is_right());
        assert!(r.is_right());
        assert!(!r.is_left());
    }

    #[test]
    fn test_from_maybe() {
        assert_eq!(
            Either::from_maybe(Maybe::some(5), "absent"),
            Either::right(5)
        );
        assert_eq!(
            Either::from_maybe(Maybe::<i32>::none(), "absent"),
            Either::left("absent")
        );
    }

    #[test]
    fn test_map_passes_left_through() {
        let r: Either<&str, i32> = Either::right(10);
        assert_eq!(r.map(|n| n * 3), Either::right(30));

        let l: Either<&str, i32> = Either::left("denied");
        assert_eq!(l.map(|n| n * 3), Either::left("denied"));
    }

    #[test]
    fn test_map_left() {
        let l: Either<i32, &str> = Either::left(404);
        assert_eq!(l.map_left(|c| c + 1), Either::left(405));

        let r: Either<i32, &str> = Either::right("ok");
        assert_eq!(r.map_left(|c| c + 1), Either::right("ok"));
    }

    #[test]
    fn test_bimap() {
        let l: Either<i32, &str> = Either::left(1);
        assert_eq!(l.bimap(|n| n * 10, str::len), Either::left(10));

        let r: Either<i32, &str> = Either::right("hello");
        assert_eq!(r.bimap(|n| n * 10, str::len), Either::right(5));
    }

    #[test]
    fn test_and_then_short_circuits() {
        let halve = |n: i32| {
            if n % 2 == 0 {
                Either::right(n / 2)
            } else {
                Either::left("odd")
            }
        };

        assert_eq!(
            Either::<&str, _>::right(8).and_then(halve),
            Either::right(4)
        );
        assert_eq!(
            Either::<&str, _>::right(3).and_then(halve),
            Either::left("odd")
        );
        assert_eq!(
            Either::<&str, i32>::left("denied").and_then(halve),
            Either::left("denied")
        );
    }

    #[test]
    fn test_or_else_recovers() {
        let l: Either<&str, i32> = Either::left("denied");
        assert_eq!(l.or_else(|_| Either::<&str, _>::right(0)), Either::right(0));

        let r: Either<&str, i32> = Either::right(7);
        assert_eq!(r.or_else(|_| Either::<&str, _>::right(0)), Either::right(7));
    }

    #[test]
    fn test_unwrap_with_fallback() {
        assert_eq!(Either::<&str, i32>::right(42).right_or(0), 42);
        assert_eq!(Either::<&str, i32>::left("denied").right_or(0), 0);
        assert_eq!(
            Either::<&str, i32>::left("four").right_or_else(|s| s.len() as i32),
            4
        );
        assert_eq!(
            Either::<&str, i32>::left("denied").left_or("none"),
            "denied"
        );
        assert_eq!(Either::<&str, i32>::right(1).left_or("none"), "none");
    }

    #[test]
    fn test_fold() {
        let l: Either<&str, i32> = Either::left("denied");
        assert_eq!(l.fold(|e| e.len(), |n| n as usize), 6);

        let r: Either<&str, i32> = Either::right(42);
        assert_eq!(r.fold(|e| e.len(), |n| n as usize), 42);
    }

    #[test]
    fn test_as_ref_and_as_mut() {
        let e: Either<&str, i32> = Either::right(1);
        assert_eq!(e.as_ref(), Either::right(&1));

        let mut e: Either<&str, i32> = Either::right(1);
        if let Either::Right(r) = e.as_mut() {
            *r = 2;
        }
        assert_eq!(e, Either::right(2));
    }

    #[test]
    fn test_extractors() {
        assert_eq!(Either::<&str, i32>::right(1).into_right(), Some(1));
        assert_eq!(Either::<&str, i32>::right(1).into_left(), None);
        assert_eq!(Either::<&str, i32>::left("x").into_left(), Some("x"));
        assert_eq!(Either::<&str, i32>::left("x").into_right(), None);
    }

    #[test]
    fn test_result_conversions() {
        let ok: Result<i32, &str> = Ok(42);
        assert_eq!(Either::from(ok), Either::right(42));

        let err: Result<i32, &str> = Err("denied");
        assert_eq!(Either::from(err), Either::left("denied"));

        let back: Result<i32, &str> = Either::right(42).into();
        assert_eq!(back, Ok(42));
    }

    #[test]
    fn test_flatten() {
        let nested: Either<&str, Either<&str, i32>> = Either::right(Either::right(42));
        assert_eq!(nested.flatten(), Either::right(42));

        let outer: Either<&str, Either<&str, i32>> = Either::left("outer");
        assert_eq!(outer.flatten(), Either::left("outer"));
    }

    #[test]
    fn test_partition_preserves_order() {
        let items = vec![
            Either::right("a"),
            Either::left(1),
            Either::right("b"),
            Either::left(2),
        ];

        let (failures, successes) = partition(items);
        assert_eq!(failures, vec![1, 2]);
        assert_eq!(successes, vec!["a", "b"]);
    }

    #[test]
    fn test_lefts_and_rights() {
        let items = || vec![Either::left(1), Either::right("a"), Either::left(2)];

        assert_eq!(lefts(items()).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rights(items()).collect::<Vec<_>>(), vec!["a"]);
    }
}
