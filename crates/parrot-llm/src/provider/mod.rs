//! Provider trait and the echo implementation

pub mod echo;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use parrot_core::RequestContext;

use crate::error::LlmError;
use crate::types::{CompletionRequest, CompletionResponse, StreamEvent};

pub use echo::EchoProvider;

/// Ordered, finite stream of completion events
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send>>;

/// Trait implemented by completion backends
///
/// Callers guarantee `request.messages` is non-empty.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Produce a complete response in one piece
    async fn complete(
        &self,
        request: &CompletionRequest,
        context: &RequestContext,
    ) -> Result<CompletionResponse, LlmError>;

    /// Produce the response as a stream of chunks
    async fn complete_stream(
        &self,
        request: &CompletionRequest,
        context: &RequestContext,
    ) -> Result<CompletionStream, LlmError>;
}
