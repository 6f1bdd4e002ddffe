//! Mapping between internal types and the `OpenAI` JSON shapes

use crate::protocol::openai::{
    AssistantMessage, ChatCompletion, ChatCompletionChunk, ChatRequest, ChunkChoice, ChunkDelta, CompletionChoice,
    ContentPart, TokenUsage, WireContent, WireMessage,
};
use crate::types::{CompletionParams, CompletionRequest, CompletionResponse, Message, StreamDelta, Usage};

/// Object type of an atomic completion
pub const COMPLETION_OBJECT: &str = "chat.completion";

/// Object type of a streamed chunk
pub const CHUNK_OBJECT: &str = "chat.completion.chunk";

impl ChatRequest {
    /// Convert into an internal request, filling absent fields with defaults
    pub fn into_completion_request(self, default_model: &str) -> CompletionRequest {
        let defaults = CompletionParams::default();

        CompletionRequest {
            model: self.model.unwrap_or_else(|| default_model.to_owned()),
            messages: self.messages.into_iter().map(Into::into).collect(),
            params: CompletionParams {
                max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
                temperature: self.temperature.unwrap_or(defaults.temperature),
            },
            stream: self.stream.unwrap_or(false),
        }
    }
}

impl From<WireMessage> for Message {
    fn from(message: WireMessage) -> Self {
        let content = match message.content {
            Some(WireContent::Text(text)) => text,
            Some(WireContent::Parts(parts)) => parts
                .into_iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text),
                    ContentPart::Other => None,
                })
                .collect(),
            None => String::new(),
        };

        Self::new(message.role, content)
    }
}

impl From<CompletionResponse> for ChatCompletion {
    fn from(response: CompletionResponse) -> Self {
        let role = response.role().to_owned();

        Self {
            id: response.id,
            object: COMPLETION_OBJECT,
            created: response.created,
            model: response.model,
            choices: vec![CompletionChoice {
                index: 0,
                message: AssistantMessage {
                    role,
                    content: response.content,
                },
                finish_reason: Some(response.finish_reason.as_str()),
            }],
            usage: response.usage.into(),
        }
    }
}

impl From<Usage> for TokenUsage {
    fn from(usage: Usage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

/// Wrap one framed delta in a `chat.completion.chunk` for `model`
pub fn delta_to_chunk(delta: StreamDelta, model: &str) -> ChatCompletionChunk {
    ChatCompletionChunk {
        id: delta.id,
        object: CHUNK_OBJECT,
        created: delta.created,
        model: model.to_owned(),
        choices: [ChunkChoice {
            index: 0,
            delta: ChunkDelta {
                role: delta.role,
                content: delta.content,
            },
            finish_reason: delta.finish_reason.map(|reason| reason.as_str()),
        }],
    }
}
