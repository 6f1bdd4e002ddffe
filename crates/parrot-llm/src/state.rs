//! Shared state behind the completion handlers

use std::sync::Arc;
use std::time::Instant;

use parrot_config::CompletionsConfig;
use parrot_core::RequestContext;
use parrot_telemetry::CompletionMetrics;

use crate::error::LlmError;
use crate::provider::{CompletionStream, EchoProvider, Provider};
use crate::types::{CompletionRequest, CompletionResponse};

/// Shared state for completion route handlers
///
/// Read-only once built; cloning only bumps a reference count.
#[derive(Clone)]
pub struct LlmState {
    pub(crate) inner: Arc<LlmStateInner>,
}

pub(crate) struct LlmStateInner {
    pub(crate) provider: Arc<dyn Provider>,
    pub(crate) default_model: String,
    pub(crate) metrics: CompletionMetrics,
}

impl LlmState {
    /// Build state around an arbitrary provider
    pub fn new(provider: Arc<dyn Provider>, default_model: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(LlmStateInner {
                provider,
                default_model: default_model.into(),
                metrics: CompletionMetrics::new(),
            }),
        }
    }

    /// Build state with the echo provider from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the completions section holds an invalid chunk delay
    pub fn from_config(config: &CompletionsConfig) -> Result<Self, LlmError> {
        let provider = EchoProvider::from_config(config)?;

        tracing::debug!(
            provider = provider.name(),
            default_model = %config.default_model,
            chunk_delay = ?provider.chunk_delay(),
            id_strategy = ?config.id_strategy,
            "completion provider ready"
        );

        Ok(Self::new(Arc::new(provider), config.default_model.clone()))
    }

    /// Model reported for requests that do not name one
    pub fn default_model(&self) -> &str {
        &self.inner.default_model
    }

    /// Execute a non-streaming completion
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::EmptyConversation`] when the request has no messages,
    /// or whatever the provider fails with
    pub async fn complete(
        &self,
        request: CompletionRequest,
        context: RequestContext,
    ) -> Result<CompletionResponse, LlmError> {
        ensure_messages(&request)?;

        let start = Instant::now();
        self.inner.metrics.record_request(&request.model, false);

        let response = self.inner.provider.complete(&request, &context).await?;
        self.inner.metrics.record_duration(&request.model, start);

        tracing::info!(
            request_id = %context.request_id,
            model = %request.model,
            provider = self.inner.provider.name(),
            "completion served"
        );

        Ok(response)
    }

    /// Execute a streaming completion
    ///
    /// Validation happens before the stream is built, so a rejected request
    /// never produces a chunk.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::EmptyConversation`] when the request has no messages,
    /// or whatever the provider fails with
    pub async fn complete_stream(
        &self,
        request: CompletionRequest,
        context: RequestContext,
    ) -> Result<CompletionStream, LlmError> {
        ensure_messages(&request)?;

        self.inner.metrics.record_request(&request.model, true);

        let stream = self.inner.provider.complete_stream(&request, &context).await?;

        tracing::info!(
            request_id = %context.request_id,
            model = %request.model,
            provider = self.inner.provider.name(),
            "completion stream started"
        );

        Ok(stream)
    }

    pub(crate) fn metrics(&self) -> &CompletionMetrics {
        &self.inner.metrics
    }
}

fn ensure_messages(request: &CompletionRequest) -> Result<(), LlmError> {
    if request.messages.is_empty() {
        tracing::debug!(model = %request.model, stream = request.stream, "rejecting empty conversation");
        return Err(LlmError::EmptyConversation);
    }
    Ok(())
}
