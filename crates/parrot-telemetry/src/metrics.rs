//! Metric names and recorders for completion traffic

use std::time::Instant;

use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram};

pub const LLM_REQUEST_COUNT: &str = "llm.request.count";
pub const LLM_REQUEST_DURATION: &str = "llm.request.duration";
pub const LLM_STREAMING_CHUNKS: &str = "llm.streaming.chunks";

/// Instruments recorded by the completion handlers
///
/// Backed by the global meter provider, so recording is a no-op until
/// [`crate::init`] installs an exporting provider.
#[derive(Clone)]
pub struct CompletionMetrics {
    requests: Counter<u64>,
    duration: Histogram<f64>,
    chunks: Counter<u64>,
}

impl CompletionMetrics {
    /// Create instruments on the global `parrot` meter
    pub fn new() -> Self {
        let meter = global::meter("parrot");

        Self {
            requests: meter
                .u64_counter(LLM_REQUEST_COUNT)
                .with_description("Chat completion requests served")
                .build(),
            duration: meter
                .f64_histogram(LLM_REQUEST_DURATION)
                .with_unit("s")
                .with_description("Time to build an atomic completion")
                .build(),
            chunks: meter
                .u64_counter(LLM_STREAMING_CHUNKS)
                .with_description("Content chunks emitted on streams")
                .build(),
        }
    }

    /// Count one completion request
    pub fn record_request(&self, model: &str, stream: bool) {
        self.requests.add(1, &attributes(model, stream));
    }

    /// Record how long an atomic completion took
    pub fn record_duration(&self, model: &str, start: Instant) {
        self.duration
            .record(start.elapsed().as_secs_f64(), &attributes(model, false));
    }

    /// Count one emitted stream chunk
    pub fn record_chunk(&self, model: &str) {
        self.chunks.add(1, &attributes(model, true));
    }
}

impl Default for CompletionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CompletionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionMetrics").finish_non_exhaustive()
    }
}

fn attributes(model: &str, stream: bool) -> [KeyValue; 2] {
    [
        KeyValue::new("model", model.to_owned()),
        KeyValue::new("stream", stream),
    ]
}
