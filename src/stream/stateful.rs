//! Stateful mapping over a stream, with a final-state future.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::stream::{self, Stream, StreamExt};

/// Thread an accumulator across a stream while mapping it.
///
/// Returns a pair: the [`FinalState`] future and the mapped output stream.
/// For each input item the mapper receives `(current_state, item)` and
/// resolves to `Ok((new_state, output))`; the state is updated strictly
/// before the output is yielded and before the next input is pulled.
/// Everything is single-threaded and strictly sequential. Synchronous
/// mappers lift with `std::future::ready`; [`AsyncEither`]-backed mappers
/// lift through [`full_join`].
///
/// The [`FinalState`] future resolves once the output stream is fully
/// drained. If the mapper fails, the output stream ends at that item and the
/// future reports [`StatefulError::Mapper`]; if the output stream is dropped
/// before completion, it reports [`StatefulError::Abandoned`].
///
/// The initial state is moved in, so the caller's original value is never
/// mutated behind its back.
///
/// [`AsyncEither`]: crate::AsyncEither
/// [`full_join`]: crate::AsyncEither::full_join
///
/// # Example
///
/// ```rust
/// use std::future::ready;
/// use futures::stream::{self, StreamExt};
/// use millrace::stream as mstream;
///
/// # tokio_test::block_on(async {
/// // Yield the pre-increment counter for each item.
/// let (final_state, numbered) = mstream::stateful_map(
///     0u32,
///     |state, _item: i32| ready(Ok::<_, &str>((state + 1, state))),
///     stream::iter([10, 20, 30]),
/// );
///
/// let outputs: Vec<u32> = numbered.collect().await;
/// assert_eq!(outputs, vec![0, 1, 2]);
/// assert_eq!(final_state.await, Ok(3));
/// # });
/// ```
pub fn stateful_map<In, S, U, E, F, Fut>(
    initial: S,
    f: F,
    input: In,
) -> (FinalState<S, E>, impl Stream<Item = U>)
where
    In: Stream,
    F: FnMut(S, In::Item) -> Fut,
    Fut: Future<Output = Result<(S, U), E>>,
{
    let (sender, receiver) = oneshot::channel();

    let output = stream::unfold(
        Some((Box::pin(input), f, initial, sender)),
        |state| async move {
            let (mut input, mut f, current, sender) = state?;
            match input.next().await {
                None => {
                    let _ = sender.send(Ok(current));
                    None
                }
                Some(item) => match f(current, item).await {
                    Ok((next, output)) => Some((output, Some((input, f, next, sender)))),
                    Err(error) => {
                        let _ = sender.send(Err(error));
                        None
                    }
                },
            }
        },
    );

    (FinalState { receiver }, output)
}

/// Future resolving to the final accumulated state of
/// [`stateful_map`] once its output stream is drained.
pub struct FinalState<S, E> {
    receiver: oneshot::Receiver<Result<S, E>>,
}

impl<S, E> Future for FinalState<S, E> {
    type Output = Result<S, StatefulError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let receiver = &mut self.get_mut().receiver;
        Pin::new(receiver).poll(cx).map(|outcome| match outcome {
            Ok(Ok(state)) => Ok(state),
            Ok(Err(error)) => Err(StatefulError::Mapper(error)),
            Err(oneshot::Canceled) => Err(StatefulError::Abandoned),
        })
    }
}

impl<S, E> std::fmt::Debug for FinalState<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinalState")
            .field("receiver", &"<pending>")
            .finish()
    }
}

/// Error reported by [`FinalState`] when no final state is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatefulError<E> {
    /// The mapping function failed; the output stream ended at that item.
    Mapper(E),
    /// The output stream was dropped before it was fully drained.
    Abandoned,
}

impl<E> StatefulError<E> {
    /// Returns `true` if the mapping function failed.
    pub fn is_mapper(&self) -> bool {
        matches!(self, Self::Mapper(_))
    }

    /// Returns `true` if the output stream was abandoned.
    pub fn is_abandoned(&self) -> bool {
        matches!(self, Self::Abandoned)
    }

    /// Extract the mapper error if present.
    pub fn into_mapper(self) -> Option<E> {
        match self {
            Self::Mapper(error) => Some(error),
            Self::Abandoned => None,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for StatefulError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mapper(error) => write!(f, "stateful mapper failed: {}", error),
            Self::Abandoned => write!(f, "output stream dropped before completion"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for StatefulError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mapper(error) => Some(error),
            Self::Abandoned => None,
        }
    }
}
