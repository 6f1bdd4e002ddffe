//! Internal canonical types for chat completion requests and responses
//!
//! These types are independent of the wire format. Handlers convert the
//! `OpenAI` protocol types into them on the way in and back out again.

pub mod message;
pub mod request;
pub mod response;
pub mod stream;

pub use message::Message;
pub use request::{CompletionParams, CompletionRequest};
pub use response::{CompletionResponse, FinishReason, Usage};
pub use stream::{StreamDelta, StreamEvent};

/// Role carried by every generated message
pub const ASSISTANT_ROLE: &str = "assistant";

/// Current Unix time in whole seconds
pub(crate) fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
