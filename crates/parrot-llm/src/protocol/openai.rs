//! `OpenAI` chat completion JSON shapes
//!
//! Inbound types only deserialize and outbound types only serialize, since
//! Parrot never plays the client side of the protocol.

use serde::{Deserialize, Serialize};

// -- Inbound --

/// Body of `POST /chat/completions`
///
/// Every field except `messages` may be absent or `null`, which both mean
/// "use the default". Fields Parrot has no use for (`top_p`, `tools`, ...)
/// are ignored rather than rejected.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: Option<String>,
    pub messages: Vec<WireMessage>,
    /// Any integer is accepted; the value is never acted on
    #[serde(default)]
    pub max_tokens: Option<i64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub stream: Option<bool>,
}

/// One conversation turn as sent by a client
#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub role: String,
    /// Missing and `null` content both read as empty text
    #[serde(default)]
    pub content: Option<WireContent>,
}

/// Message content: a bare string or a list of typed parts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A typed content part; anything that is not text carries nothing to echo
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    #[serde(other)]
    Other,
}

// -- Outbound --

/// Atomic `chat.completion` document
#[derive(Debug, Serialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: &'static str,
    pub created: u64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: TokenUsage,
}

#[derive(Debug, Serialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct AssistantMessage {
    pub role: String,
    pub content: String,
}

/// Token accounting; always zero since nothing is inferred
#[derive(Debug, Serialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One `chat.completion.chunk` event payload
///
/// Carries no `usage` key.
#[derive(Debug, Serialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: &'static str,
    pub created: u64,
    pub model: String,
    pub choices: [ChunkChoice; 1],
}

#[derive(Debug, Serialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    /// Written as `null` on every chunk but the last
    pub finish_reason: Option<&'static str>,
}

/// Fields added by one chunk; `role` is omitted entirely after the first
#[derive(Debug, Serialize)]
pub struct ChunkDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub content: String,
}

/// Body of `GET /v1/models`
#[derive(Debug, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<ModelCard>,
}

#[derive(Debug, Serialize)]
pub struct ModelCard {
    pub id: String,
    pub object: &'static str,
    pub created: u64,
    pub owned_by: &'static str,
}

/// `{"error": {...}}` body returned with every 4xx/5xx
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: &'static str,
    pub code: Option<String>,
}
