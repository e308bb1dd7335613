//! Asynchronous pull-based iteration combinators.
//!
//! The async analogue of [`crate::iter`], built on [`futures::Stream`].
//! Synchronous sequence shapes enter this world through
//! `futures::stream::iter`; everything async-native is already a `Stream`.
//!
//! # Pull discipline
//!
//! Every combinator here pulls strictly one item at a time from a single
//! source: no internal concurrent fan-out, no prefetching. Suspension only
//! happens while awaiting an underlying pull, a mapping step, or a tap side
//! effect; between suspensions execution is synchronous. Output order is
//! always identical to input pull order.
//!
//! A source passed into a combinator is exclusively owned by the resulting
//! stream for its entire lifetime. Every combinator is safe to abandon
//! mid-pull, since dropping the stream leaves no half-applied state behind,
//! though releasing external resources tied to an abandoned source (an open
//! cursor, say) remains the owner's concern.
//!
//! # Per-item failures
//!
//! [`capture`] adapts a fallible source into a stream of
//! [`Either`](crate::Either) items:
//! a fault becomes an in-band `Left` element instead of an error. The
//! `either_*` combinators then transform such streams while passing `Left`
//! items through untouched. See [`stateful_map`] for threading an
//! accumulator across a stream.
//!
//! # Example
//!
//! ```rust
//! use futures::stream;
//! use millrace::stream as mstream;
//!
//! # tokio_test::block_on(async {
//! let doubled = mstream::map(stream::iter([1, 2, 3]), |n| async move { n * 2 });
//! let total = mstream::reduce(doubled, 0, |acc, n| async move { acc + n }).await;
//! assert_eq!(total, 12);
//! # });
//! ```

use std::future::Future;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};

mod either_items;
mod stateful;

pub use either_items::{capture, either_flat_map, either_map, once_either};
pub use stateful::{stateful_map, FinalState, StatefulError};

/// Lazily transform each element with a future-returning function.
///
/// Synchronous mappers lift with `std::future::ready`. Output length and
/// order match the input.
pub fn map<In, U, F, Fut>(input: In, f: F) -> impl Stream<Item = U>
where
    In: Stream,
    F: FnMut(In::Item) -> Fut,
    Fut: Future<Output = U>,
{
    stream::unfold((Box::pin(input), f), |(mut input, mut f)| async move {
        let item = input.next().await?;
        let output = f(item).await;
        Some((output, (input, f)))
    })
}

/// Lazily keep only the elements whose (possibly asynchronous) predicate
/// resolves to `true`.
pub fn filter<In, P, Fut>(input: In, predicate: P) -> impl Stream<Item = In::Item>
where
    In: Stream,
    P: FnMut(&In::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    stream::unfold(
        (Box::pin(input), predicate),
        |(mut input, mut predicate)| async move {
            loop {
                let item = input.next().await?;
                if predicate(&item).await {
                    return Some((item, (input, predicate)));
                }
            }
        },
    )
}

/// Flatten one level of nested streams, transforming each inner element.
///
/// Consumption is outer-then-inner and strictly sequential: an inner stream
/// is drained completely before the next outer element is pulled.
pub fn flat_map<Out, U, F, Fut>(
    outer: Out,
    f: F,
) -> impl Stream<Item = U>
where
    Out: Stream,
    Out::Item: Stream,
    F: FnMut(<Out::Item as Stream>::Item) -> Fut,
    Fut: Future<Output = U>,
{
    stream::unfold(
        (Box::pin(outer), None::<Pin<Box<Out::Item>>>, f),
        |(mut outer, mut inner, mut f)| async move {
            loop {
                let inner_item = match inner.as_mut() {
                    Some(current) => current.next().await,
                    None => None,
                };

                if let Some(item) = inner_item {
                    let output = f(item).await;
                    return Some((output, (outer, inner, f)));
                }

                match outer.next().await {
                    Some(next_inner) => inner = Some(Box::pin(next_inner)),
                    None => return None,
                }
            }
        },
    )
}

/// Run a side effect per element; each element passes through unchanged.
pub fn tap<In, F, Fut>(input: In, f: F) -> impl Stream<Item = In::Item>
where
    In: Stream,
    F: FnMut(&In::Item) -> Fut,
    Fut: Future<Output = ()>,
{
    stream::unfold((Box::pin(input), f), |(mut input, mut f)| async move {
        let item = input.next().await?;
        f(&item).await;
        Some((item, (input, f)))
    })
}

/// Chain two streams: `a` is fully drained before the first pull of `b`,
/// and elements are never interleaved.
///
/// ```rust
/// use futures::stream::{self, StreamExt};
/// use millrace::stream as mstream;
///
/// # tokio_test::block_on(async {
/// let joined: Vec<i32> =
///     mstream::concat(stream::iter([1, 2]), stream::iter([3, 4])).collect().await;
/// assert_eq!(joined, vec![1, 2, 3, 4]);
/// # });
/// ```
pub fn concat<A, B, T>(a: A, b: B) -> impl Stream<Item = T>
where
    A: Stream<Item = T>,
    B: Stream<Item = T>,
{
    stream::unfold(
        (Box::pin(a), Box::pin(b), false),
        |(mut a, mut b, mut a_done)| async move {
            if !a_done {
                if let Some(item) = a.next().await {
                    return Some((item, (a, b, a_done)));
                }
                // Never pull the exhausted first stream again.
                a_done = true;
            }
            let item = b.next().await?;
            Some((item, (a, b, a_done)))
        },
    )
}

/// Eagerly fold a stream left to right, one pull at a time.
pub async fn reduce<In, U, F, Fut>(input: In, initial: U, mut f: F) -> U
where
    In: Stream,
    F: FnMut(U, In::Item) -> Fut,
    Fut: Future<Output = U>,
{
    let mut input = Box::pin(input);
    let mut accumulator = initial;
    while let Some(item) = input.next().await {
        accumulator = f(accumulator, item).await;
    }
    accumulator
}

/// Resolve to `true` as soon as any element satisfies the predicate,
/// halting further pulls.
pub async fn any<In, P>(input: In, mut predicate: P) -> bool
where
    In: Stream,
    P: FnMut(&In::Item) -> bool,
{
    let mut input = Box::pin(input);
    while let Some(item) = input.next().await {
        if predicate(&item) {
            return true;
        }
    }
    false
}

/// Resolve to the first element satisfying the predicate, halting further
/// pulls. `None` if the stream completes without a match.
pub async fn find<In, P>(input: In, mut predicate: P) -> Option<In::Item>
where
    In: Stream,
    P: FnMut(&In::Item) -> bool,
{
    let mut input = Box::pin(input);
    while let Some(item) = input.next().await {
        if predicate(&item) {
            return Some(item);
        }
    }
    None
}

/// Count the elements of a stream. An empty stream counts `0`.
pub async fn count<In>(input: In) -> usize
where
    In: Stream,
{
    reduce(input, 0, |acc, _| std::future::ready(acc + 1)).await
}

/// Maximum of a stream of floats; identity is negative infinity.
pub async fn max<In>(input: In) -> f64
where
    In: Stream<Item = f64>,
{
    reduce(input, f64::NEG_INFINITY, |acc, n| {
        std::future::ready(acc.max(n))
    })
    .await
}

/// Minimum of a stream of floats; identity is positive infinity.
pub async fn min<In>(input: In) -> f64
where
    In: Stream<Item = f64>,
{
    reduce(input, f64::INFINITY, |acc, n| std::future::ready(acc.min(n))).await
}
