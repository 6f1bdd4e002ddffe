use std::time::Duration;

use serde::Deserialize;

/// Model reported when a request does not name one
pub const DEFAULT_MODEL: &str = "mock-gpt-model";

/// Pause between streamed chunks when none is configured
pub const DEFAULT_CHUNK_DELAY: &str = "100ms";

/// Chat completion emulation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionsConfig {
    /// Model name filled in for requests without a `model` field
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Pause after each streamed chunk (e.g. "100ms", "1s")
    #[serde(default = "default_chunk_delay")]
    pub chunk_delay: String,
    /// How completion and chunk ids are generated
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl Default for CompletionsConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            chunk_delay: default_chunk_delay(),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl CompletionsConfig {
    /// Parse the configured chunk delay
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid duration string
    pub fn chunk_delay(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.chunk_delay)
            .map_err(|e| anyhow::anyhow!("invalid completions.chunk_delay '{}': {e}", self.chunk_delay))
    }
}

/// Completion id generation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// One random `chatcmpl-<uuid>` per request, shared by all chunks of a stream
    #[default]
    Unique,
    /// Fixed `chatcmpl-1337` for atomic responses and `chatcmpl-<index>` per chunk
    Legacy,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_owned()
}

fn default_chunk_delay() -> String {
    DEFAULT_CHUNK_DELAY.to_owned()
}
