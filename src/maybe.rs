//! Presence or absence of a value, with total operations.
//!
//! `Maybe<T>` is the crate's absence type: `Some(T)` when a value is present,
//! `None` when it is not. It mirrors `Option` deliberately (the conversions
//! in both directions are free) but keeps the same no-panic surface as
//! [`crate::Either`]: there is no `unwrap`, only fallback-taking extractors.
//!
//! Use [`Maybe::ok_or`] to promote an absence into a typed failure when a
//! pipeline needs to report *why* something was missing.

use crate::Either;

/// A value that is either present (`Some`) or absent (`None`).
///
/// # Example
///
/// ```rust
/// use millrace::Maybe;
///
/// let found = Maybe::some(3).map(|n| n * 2);
/// assert_eq!(found.some_or(0), 6);
///
/// let missing: Maybe<i32> = Maybe::none();
/// assert_eq!(missing.map(|n| n * 2).some_or(0), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maybe<T> {
    /// A present value.
    Some(T),
    /// No value.
    None,
}

impl<T> Maybe<T> {
    // ========== Constructors ==========

    /// Create a present value.
    #[inline]
    pub fn some(value: T) -> Self {
        Maybe::Some(value)
    }

    /// Create an absent value.
    #[inline]
    pub fn none() -> Self {
        Maybe::None
    }

    // ========== Predicates ==========

    /// Returns `true` if a value is present.
    #[inline]
    pub fn is_some(&self) -> bool {
        matches!(self, Maybe::Some(_))
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Maybe::None)
    }

    // ========== Transformations ==========

    /// Transform the present value, passing `None` through unchanged.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Maybe::Some(value) => Maybe::Some(f(value)),
            Maybe::None => Maybe::None,
        }
    }

    /// Chain a step that may itself come up empty.
    ///
    /// ```rust
    /// use millrace::Maybe;
    ///
    /// let lookup = |n: i32| if n > 0 { Maybe::some(n * 10) } else { Maybe::none() };
    ///
    /// assert_eq!(Maybe::some(3).and_then(lookup), Maybe::some(30));
    /// assert_eq!(Maybe::some(-1).and_then(lookup), Maybe::none());
    /// assert_eq!(Maybe::<i32>::none().and_then(lookup), Maybe::none());
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self {
            Maybe::Some(value) => f(value),
            Maybe::None => Maybe::None,
        }
    }

    /// Keep the value only if it satisfies the predicate.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Maybe::Some(value) if predicate(&value) => Maybe::Some(value),
            _ => Maybe::None,
        }
    }

    // ========== Unwrap with fallback ==========

    /// Return the value or a fallback.
    #[inline]
    pub fn some_or(self, default: T) -> T {
        match self {
            Maybe::Some(value) => value,
            Maybe::None => default,
        }
    }

    /// Return the value or compute a fallback.
    #[inline]
    pub fn some_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Maybe::Some(value) => value,
            Maybe::None => f(),
        }
    }

    // ========== Folding ==========

    /// Collapse both variants into a single value.
    #[inline]
    pub fn fold<U, F, G>(self, on_none: F, on_some: G) -> U
    where
        F: FnOnce() -> U,
        G: FnOnce(T) -> U,
    {
        match self {
            Maybe::Some(value) => on_some(value),
            Maybe::None => on_none(),
        }
    }

    // ========== Borrowing and conversions ==========

    /// Convert to `Maybe<&T>`.
    #[inline]
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Some(value) => Maybe::Some(value),
            Maybe::None => Maybe::None,
        }
    }

    /// Convert to the standard library `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Some(value) => Some(value),
            Maybe::None => None,
        }
    }

    /// Promote an absence into a typed failure.
    ///
    /// ```rust
    /// use millrace::{Either, Maybe};
    ///
    /// assert_eq!(Maybe::some(3).ok_or("missing"), Either::right(3));
    /// assert_eq!(Maybe::<i32>::none().ok_or("missing"), Either::left("missing"));
    /// ```
    #[inline]
    pub fn ok_or<L>(self, left_value: L) -> Either<L, T> {
        Either::from_maybe(self, left_value)
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Maybe::Some(value),
            None => Maybe::None,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        maybe.into_option()
    }
}
