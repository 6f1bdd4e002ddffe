use super::ASSISTANT_ROLE;

/// Reason generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Natural end of generation
    Stop,
}

impl FinishReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "stop",
        }
    }
}

/// Token accounting; nothing is counted, so every field stays zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A finished, non-streamed completion with its single assistant reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub id: String,
    /// Unix seconds at construction
    pub created: u64,
    /// Model reported to the client
    pub model: String,
    pub content: String,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

impl CompletionResponse {
    /// Role of the reply; completions are always authored by the assistant
    pub const fn role(&self) -> &'static str {
        ASSISTANT_ROLE
    }
}
