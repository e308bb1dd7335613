//! Synchronous pull-based iteration combinators.
//!
//! Every function here accepts any [`IntoIterator`] (a collection, a
//! restartable iterable, a one-shot iterator, or a deferred producer) and
//! adapts it to a single pull protocol ([`Iterator`]) once, at the function
//! boundary. The lazy adapters ([`map`], [`filter`], [`concat`]) are explicit
//! named structs with hand-written `next` implementations; values are pulled
//! on demand and never eagerly materialized. The terminals ([`reduce`],
//! [`find`], [`includes`]) drain eagerly, left to right, in a single pass.
//!
//! A one-shot source is exhausted after one full consumption. Feeding the
//! same exhausted iterator through a second combinator is caller error; no
//! combinator defends against it.
//!
//! # Example
//!
//! ```rust
//! use millrace::iter;
//!
//! let doubled: Vec<i32> = iter::map([1, 2, 3], |n| n * 2).collect();
//! assert_eq!(doubled, vec![2, 4, 6]);
//!
//! let evens: Vec<i32> = iter::filter(1..=6, |n| n % 2 == 0).collect();
//! assert_eq!(evens, vec![2, 4, 6]);
//!
//! assert_eq!(iter::reduce(1..=4, 0, |acc, n| acc + n), 10);
//! ```

/// Lazily transform each element of a sequence.
///
/// The output has the same length and order as the input; `f` runs once per
/// pulled element.
pub fn map<I, U, F>(input: I, f: F) -> Map<I::IntoIter, F>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> U,
{
    Map {
        inner: input.into_iter(),
        f,
    }
}

/// Lazy adapter returned by [`map`].
pub struct Map<I, F> {
    inner: I,
    f: F,
}

impl<I, U, F> Iterator for Map<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        self.inner.next().map(&mut self.f)
    }
}

impl<I: std::fmt::Debug, F> std::fmt::Debug for Map<I, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("inner", &self.inner)
            .field("f", &"<function>")
            .finish()
    }
}

/// Lazily keep only the elements satisfying a predicate.
pub fn filter<I, P>(input: I, predicate: P) -> Filter<I::IntoIter, P>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    Filter {
        inner: input.into_iter(),
        predicate,
    }
}

/// Lazy adapter returned by [`filter`].
pub struct Filter<I, P> {
    inner: I,
    predicate: P,
}

impl<I, P> Iterator for Filter<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.inner.next()?;
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
    }
}

impl<I: std::fmt::Debug, P> std::fmt::Debug for Filter<I, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("inner", &self.inner)
            .field("predicate", &"<function>")
            .finish()
    }
}

/// Lazily chain two sequences: `a` is fully drained before the first pull of
/// `b`, and elements are never interleaved.
///
/// ```rust
/// use millrace::iter;
///
/// let joined: Vec<i32> = iter::concat([1, 2], [3, 4]).collect();
/// assert_eq!(joined, vec![1, 2, 3, 4]);
/// ```
pub fn concat<A, B, T>(a: A, b: B) -> Concat<A::IntoIter, B::IntoIter>
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    Concat {
        first: a.into_iter(),
        second: b.into_iter(),
        first_done: false,
    }
}

/// Lazy adapter returned by [`concat`].
#[derive(Debug)]
pub struct Concat<A, B> {
    first: A,
    second: B,
    first_done: bool,
}

impl<A, B, T> Iterator for Concat<A, B>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        // Never pull an exhausted first sequence again.
        if !self.first_done {
            if let Some(item) = self.first.next() {
                return Some(item);
            }
            self.first_done = true;
        }
        self.second.next()
    }
}

/// Eagerly fold a sequence left to right in a single pass.
pub fn reduce<I, U, F>(input: I, initial: U, mut f: F) -> U
where
    I: IntoIterator,
    F: FnMut(U, I::Item) -> U,
{
    let mut accumulator = initial;
    for item in input {
        accumulator = f(accumulator, item);
    }
    accumulator
}

/// Eagerly return the first element satisfying the predicate, short-circuiting
/// the remaining pulls. `None` if no element matches.
pub fn find<I, P>(input: I, mut predicate: P) -> Option<I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    for item in input {
        if predicate(&item) {
            return Some(item);
        }
    }
    None
}

/// Eager membership test by value equality, short-circuiting on the first
/// match.
pub fn includes<I, T>(input: I, value: &T) -> bool
where
    I: IntoIterator<Item = T>,
    T: PartialEq,
{
    for item in input {
        if item == *value {
            return true;
        }
    }
    false
}

/// Count the elements of a sequence. An empty sequence counts `0`.
pub fn count<I>(input: I) -> usize
where
    I: IntoIterator,
{
    reduce(input, 0, |acc, _| acc + 1)
}

/// Maximum of a sequence of floats; identity is negative infinity.
pub fn max<I>(input: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    reduce(input, f64::NEG_INFINITY, f64::max)
}

/// Minimum of a sequence of floats; identity is positive infinity.
pub fn min<I>(input: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    reduce(input, f64::INFINITY, f64::min)
}

/// Build a mapping closure that threads an accumulator across calls.
///
/// The function receives `(value, current_state)` and returns
/// `(output, new_state)`; the state is updated before the output is
/// returned. Handy for numbering or de-duplicating while mapping.
///
/// ```rust
/// use millrace::iter;
///
/// let mut number = iter::stateful(0u32, |name: &str, n| (format!("{n}: {name}"), n + 1));
/// assert_eq!(number("alpha"), "0: alpha");
/// assert_eq!(number("beta"), "1: beta");
/// ```
pub fn stateful<S, T, U, F>(initial: S, mut f: F) -> impl FnMut(T) -> U
where
    F: FnMut(T, S) -> (U, S),
{
    let mut state = Some(initial);
    move |value| {
        let current = state.take().expect("stateful mapper panicked on a previous call");
        let (output, next) = f(value, current);
        state = Some(next);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_map_preserves_length_and_order() {
        let out: Vec<i32> = map(vec![1, 2, 3], |n| n * 10).collect();
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[test]
    fn test_map_is_lazy() {
        let calls = Cell::new(0);
        let mut mapped = map(1..=3, |n| {
            calls.set(calls.get() + 1);
            n * 2
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.next(), Some(2));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_filter() {
        let out: Vec<i32> = filter(1..=6, |n| n % 2 == 0).collect();
        assert_eq!(out, vec![2, 4, 6]);
    }

    #[test]
    fn test_concat_never_interleaves() {
        let out: Vec<i32> = concat([1, 2], [3, 4]).collect();
        assert_eq!(out, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_concat_with_empty_sides() {
        let out: Vec<i32> = concat(Vec::new(), vec![3, 4]).collect();
        assert_eq!(out, vec![3, 4]);

        let out: Vec<i32> = concat(vec![1, 2], Vec::new()).collect();
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn test_reduce() {
        assert_eq!(reduce(1..=4, 0, |acc, n| acc + n), 10);
        assert_eq!(reduce(std::iter::empty::<i32>(), 7, |acc, n| acc + n), 7);
    }

    #[test]
    fn test_find_short_circuits() {
        let pulled = Cell::new(0);
        let source = (1..=10).inspect(|_| pulled.set(pulled.get() + 1));

        assert_eq!(find(source, |n| *n == 3), Some(3));
        assert_eq!(pulled.get(), 3, "find pulled past the first match");
    }

    #[test]
    fn test_find_absent() {
        assert_eq!(find(1..=3, |n| *n > 100), None);
    }

    #[test]
    fn test_includes() {
        assert!(includes(vec!["a", "b", "c"], &"b"));
        assert!(!includes(vec!["a", "b", "c"], &"z"));
    }

    #[test]
    fn test_terminal_identities_on_empty() {
        assert_eq!(count(std::iter::empty::<i32>()), 0);
        assert_eq!(max(std::iter::empty::<f64>()), f64::NEG_INFINITY);
        assert_eq!(min(std::iter::empty::<f64>()), f64::INFINITY);
    }

    #[test]
    fn test_max_min() {
        assert_eq!(max(vec![1.0, 5.0, 3.0]), 5.0);
        assert_eq!(min(vec![4.0, 2.0, 9.0]), 2.0);
    }

    #[test]
    fn test_count() {
        assert_eq!(count(vec!['a', 'b', 'c']), 3);
    }

    #[test]
    fn test_stateful_threads_accumulator() {
        let mut pre_increment = stateful(0i32, |_value: i32, state| (state, state + 1));

        assert_eq!(pre_increment(10), 0);
        assert_eq!(pre_increment(20), 1);
        assert_eq!(pre_increment(30), 2);
    }

    #[test]
    fn test_combinators_over_one_shot_iterator() {
        // A bare iterator (one-shot shape) works the same as a collection.
        let one_shot = vec![1, 2, 3].into_iter();
        let out: Vec<i32> = map(one_shot, |n| n + 1).collect();
        assert_eq!(out, vec![2, 3, 4]);
    }
}
