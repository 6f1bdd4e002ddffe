//! Provider that answers with the last message of the conversation

use std::time::Duration;

use async_trait::async_trait;
use parrot_config::{CompletionsConfig, IdStrategy};
use parrot_core::RequestContext;

use super::{CompletionStream, Provider};
use crate::emitter::paced_stream;
use crate::error::LlmError;
use crate::framing::ChunkFramer;
use crate::ids::CompletionIds;
use crate::types::{CompletionRequest, CompletionResponse, FinishReason, Message, Usage, unix_timestamp};

/// Text put in front of every echoed message
pub const ECHO_PREFIX: &str = "As a mock AI Assistant, I can only echo your last message: ";

/// Build the completion text for a conversation
///
/// Only the last message matters; earlier history is ignored.
///
/// # Errors
///
/// Returns [`LlmError::EmptyConversation`] when there are no messages
pub fn echo_text(messages: &[Message]) -> Result<String, LlmError> {
    let last = messages.last().ok_or(LlmError::EmptyConversation)?;
    Ok(format!("{ECHO_PREFIX}{}", last.content))
}

/// Echo provider with fixed chunk pacing
#[derive(Debug, Clone)]
pub struct EchoProvider {
    id_strategy: IdStrategy,
    chunk_delay: Duration,
}

impl EchoProvider {
    pub const fn new(id_strategy: IdStrategy, chunk_delay: Duration) -> Self {
        Self {
            id_strategy,
            chunk_delay,
        }
    }

    /// Build the provider from the completions section of the config
    ///
    /// # Errors
    ///
    /// Returns an error if the configured chunk delay cannot be parsed
    pub fn from_config(config: &CompletionsConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.id_strategy, config.chunk_delay()?))
    }

    pub const fn chunk_delay(&self) -> Duration {
        self.chunk_delay
    }
}

#[async_trait]
impl Provider for EchoProvider {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        context: &RequestContext,
    ) -> Result<CompletionResponse, LlmError> {
        let text = echo_text(&request.messages)?;
        let ids = CompletionIds::for_request(self.id_strategy, context);

        Ok(CompletionResponse {
            id: ids.completion(),
            created: unix_timestamp(),
            model: request.model.clone(),
            content: text,
            finish_reason: FinishReason::Stop,
            usage: Usage::default(),
        })
    }

    async fn complete_stream(
        &self,
        request: &CompletionRequest,
        context: &RequestContext,
    ) -> Result<CompletionStream, LlmError> {
        let text = echo_text(&request.messages)?;
        let ids = CompletionIds::for_request(self.id_strategy, context);

        Ok(paced_stream(ChunkFramer::new(&text, ids), self.chunk_delay))
    }
}
