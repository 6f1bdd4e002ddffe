//! Paced delivery of framed chunks

use std::time::Duration;

use futures_util::stream;

use crate::framing::ChunkFramer;
use crate::provider::CompletionStream;
use crate::types::StreamEvent;

/// State threaded through the unfolding stream
struct Emission {
    framer: ChunkFramer,
    delay: Duration,
    started: bool,
    finished: bool,
}

impl Drop for Emission {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(remaining = self.framer.len(), "completion stream dropped before completion");
        }
    }
}

/// Turn a framer into a stream of chunk events followed by a single `Done`
///
/// Every emission after the first waits `delay` on the tokio timer, so the
/// worker thread is free while the stream is paused. Dropping the stream
/// (for example when the client disconnects) stops it at the next pause.
pub fn paced_stream(framer: ChunkFramer, delay: Duration) -> CompletionStream {
    let emission = Emission {
        framer,
        delay,
        started: false,
        finished: false,
    };

    Box::pin(stream::unfold(emission, |mut emission| async move {
        if emission.finished {
            return None;
        }

        if emission.started && !emission.delay.is_zero() {
            tokio::time::sleep(emission.delay).await;
        }
        emission.started = true;

        let event = match emission.framer.next() {
            Some(delta) => StreamEvent::Delta(delta),
            None => {
                emission.finished = true;
                StreamEvent::Done
            }
        };

        Some((Ok(event), emission))
    }))
}
