//! Common streaming machinery shared by the models

use futures::Stream;
use onerouter_core::{Error, StreamPart};
use pin_project::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Turns parsed upstream chunks into stream parts
///
/// A handler owns the running state of one stream (finish reason, usage,
/// partial tool calls) and is dropped with it.
pub trait ChunkHandler: Send {
    /// The parsed upstream chunk
    type Chunk;

    /// Handle one chunk or one chunk-level failure
    fn handle_chunk(&mut self, chunk: Result<Self::Chunk, Error>, parts: &mut VecDeque<StreamPart>);

    /// Emit the closing parts once the upstream stream has ended
    fn finish(&mut self, parts: &mut VecDeque<StreamPart>);
}

/// Stream wrapper that drives a [`ChunkHandler`] over an upstream stream
#[pin_project]
pub struct ProviderStream<S, H> {
    #[pin]
    inner: S,
    handler: H,
    pending: VecDeque<StreamPart>,
    done: bool,
}

impl<S, H> ProviderStream<S, H> {
    /// Create a new provider stream
    pub fn new(inner: S, handler: H) -> Self {
        Self {
            inner,
            handler,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<S, H> Stream for ProviderStream<S, H>
where
    S: Stream<Item = Result<H::Chunk, Error>>,
    H: ChunkHandler,
{
    type Item = StreamPart;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(part) = this.pending.pop_front() {
                return Poll::Ready(Some(part));
            }
            if *this.done {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(chunk)) => this.handler.handle_chunk(chunk, this.pending),
                Poll::Ready(None) => {
                    *this.done = true;
                    this.handler.finish(this.pending);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
