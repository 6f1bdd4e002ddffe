use super::message::Message;

/// Token budget assumed when a request does not set `max_tokens`
pub const DEFAULT_MAX_TOKENS: i64 = 512;

/// Temperature assumed when a request does not set one
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Sampling knobs a client may send
///
/// Accepted and logged for compatibility; the echo provider ignores them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    /// Kept as sent, including values no real model would accept
    pub max_tokens: i64,
    pub temperature: f64,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// A chat completion request with every default filled in
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier, echoed back in responses
    pub model: String,
    /// Conversation, oldest first
    pub messages: Vec<Message>,
    pub params: CompletionParams,
    pub stream: bool,
}

