//! Combinators over streams whose elements are `Either` values.
//!
//! [`capture`] is the single authorized boundary where a fault from a
//! fallible source becomes an in-band `Left` element. Downstream of it, a
//! stream never yields errors: [`either_map`] and [`either_flat_map`]
//! transform `Right` elements and pass `Left` elements through untouched,
//! a per-item short-circuit, not a sequence-wide one.

use std::future::Future;

use futures::stream::{self, Stream, StreamExt};

use crate::{AsyncEither, Either};

/// Adapt a fallible source into a stream of [`Either`] items.
///
/// Every successful pull yields `Right(value)`. A failed pull is converted
/// with the caller-supplied `convert` and yielded as `Left(converted)`; the
/// adapted stream then completes without pulling the source again, since a
/// pull-based producer that has faulted is finished. Natural completion of
/// the source propagates as completion, never as an element.
///
/// The converter is the only place this crate turns a fault into a failure
/// value; the crate never constructs one on its own.
///
/// # Example
///
/// ```rust
/// use futures::stream::{self, StreamExt};
/// use millrace::{stream as mstream, Either};
///
/// # tokio_test::block_on(async {
/// let source = stream::iter(vec![Ok(1), Ok(2), Err("disk error"), Ok(99)]);
/// let adapted: Vec<Either<String, i32>> =
///     mstream::capture(source, |fault| format!("fetch failed: {fault}"))
///         .collect()
///         .await;
///
/// assert_eq!(
///     adapted,
///     vec![
///         Either::right(1),
///         Either::right(2),
///         Either::left("fetch failed: disk error".to_string()),
///     ],
/// );
/// # });
/// ```
pub fn capture<S, T, E, C, L>(source: S, convert: C) -> impl Stream<Item = Either<L, T>>
where
    S: Stream<Item = Result<T, E>>,
    C: FnMut(E) -> L,
{
    stream::unfold(Some((Box::pin(source), convert)), |state| async move {
        let (mut source, mut convert) = state?;
        match source.next().await {
            Some(Ok(value)) => Some((Either::Right(value), Some((source, convert)))),
            Some(Err(fault)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("captured stream fault, yielding left item and completing");
                // The source is dropped here; a faulted producer is done.
                Some((Either::Left(convert(fault)), None))
            }
            None => None,
        }
    })
}

/// Transform the `Right` elements of an `Either` stream; `Left` elements
/// pass through untouched and the mapping function never sees them.
///
/// ```rust
/// use futures::stream::{self, StreamExt};
/// use millrace::{stream as mstream, Either};
///
/// # tokio_test::block_on(async {
/// let items = stream::iter(vec![
///     Either::<&str, i32>::right(2),
///     Either::left("denied"),
///     Either::right(3),
/// ]);
///
/// let mapped: Vec<Either<&str, i32>> =
///     mstream::either_map(items, |n| async move { n * 10 }).collect().await;
///
/// assert_eq!(
///     mapped,
///     vec![Either::right(20), Either::left("denied"), Either::right(30)],
/// );
/// # });
/// ```
pub fn either_map<S, L, T, U, F, Fut>(input: S, f: F) -> impl Stream<Item = Either<L, U>>
where
    S: Stream<Item = Either<L, T>>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = U>,
{
    stream::unfold((Box::pin(input), f), |(mut input, mut f)| async move {
        let element = match input.next().await? {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r).await),
        };
        Some((element, (input, f)))
    })
}

/// Transform the `Right` elements of an `Either` stream through an
/// [`AsyncEither`]-returning function, flattening the joined result back
/// into the element position.
///
/// A `Right` element whose effect resolves to `Left` becomes a `Left`
/// element; the stream itself keeps going either way.
pub fn either_flat_map<S, L, T, U, F>(input: S, f: F) -> impl Stream<Item = Either<L, U>>
where
    S: Stream<Item = Either<L, T>>,
    F: FnMut(T) -> AsyncEither<L, U>,
    L: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
{
    stream::unfold((Box::pin(input), f), |(mut input, mut f)| async move {
        let element = match input.next().await? {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r).join().await,
        };
        Some((element, (input, f)))
    })
}

/// A single-element stream yielding the joined result of an [`AsyncEither`].
///
/// Useful for splicing one effect into a larger `Either` stream, typically
/// via [`concat`](super::concat).
pub fn once_either<L, T>(effect: AsyncEither<L, T>) -> impl Stream<Item = Either<L, T>>
where
    L: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    stream::once(async move { effect.join().await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_capture_wraps_successes() {
        let source = stream::iter(vec![Ok::<_, &str>(1), Ok(2)]);
        let out: Vec<Either<String, i32>> =
            capture(source, |fault: &str| fault.to_string()).collect().await;
        assert_eq!(out, vec![Either::right(1), Either::right(2)]);
    }

    #[tokio::test]
    async fn test_capture_converts_fault_and_completes() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let probe = pulls.clone();

        let source = stream::iter(vec![Ok(1), Ok(2), Err("boom"), Ok(99)]).then(move |item| {
            probe.fetch_add(1, Ordering::SeqCst);
            async move { item }
        });

        let out: Vec<Either<String, i32>> =
            capture(source, |fault| format!("converted: {fault}"))
                .collect()
                .await;

        assert_eq!(
            out,
            vec![
                Either::right(1),
                Either::right(2),
                Either::left("converted: boom".to_string()),
            ],
        );
        assert_eq!(
            pulls.load(Ordering::SeqCst),
            3,
            "a fourth pull was attempted after the fault"
        );
    }

    #[tokio::test]
    async fn test_capture_propagates_natural_completion() {
        let source = stream::iter(Vec::<Result<i32, &str>>::new());
        let out: Vec<Either<String, i32>> =
            capture(source, |fault: &str| fault.to_string()).collect().await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_either_map_skips_lefts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = calls.clone();

        let items = stream::iter(vec![
            Either::<&str, i32>::right(2),
            Either::left("denied"),
            Either::right(3),
        ]);

        let out: Vec<Either<&str, i32>> = either_map(items, move |n| {
            probe.fetch_add(1, Ordering::SeqCst);
            async move { n * 10 }
        })
        .collect()
        .await;

        assert_eq!(
            out,
            vec![Either::right(20), Either::left("denied"), Either::right(30)],
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2, "mapper saw a left item");
    }

    #[tokio::test]
    async fn test_either_flat_map() {
        let items = stream::iter(vec![
            Either::<&str, u32>::right(2),
            Either::left("denied"),
            Either::right(0),
        ]);

        let out: Vec<Either<&str, u32>> = either_flat_map(items, |n| {
            if n > 0 {
                AsyncEither::right(n * 10, "oops")
            } else {
                AsyncEither::left("zero is invalid")
            }
        })
        .collect()
        .await;

        assert_eq!(
            out,
            vec![
                Either::right(20),
                Either::left("denied"),
                Either::left("zero is invalid"),
            ],
        );
    }

    #[tokio::test]
    async fn test_once_either() {
        let out: Vec<Either<&str, i32>> =
            once_either(AsyncEither::right(5, "oops")).collect().await;
        assert_eq!(out, vec![Either::right(5)]);

        let out: Vec<Either<&str, i32>> =
            once_either(AsyncEither::left("denied")).collect().await;
        assert_eq!(out, vec![Either::left("denied")]);
    }
}
