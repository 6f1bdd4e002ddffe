//! Chat completion emulation for Parrot
//!
//! Accepts `OpenAI` chat completion requests and answers them by echoing
//! the last message, either as one JSON document or as a paced stream of
//! server-sent events terminated by `data: [DONE]`.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod emitter;
pub mod error;
pub mod framing;
#[cfg(feature = "http")]
pub mod handler;
pub mod ids;
pub mod protocol;
pub mod provider;
pub mod state;
pub mod types;

pub use error::LlmError;
#[cfg(feature = "http")]
pub use handler::llm_router;
pub use provider::{CompletionStream, EchoProvider, Provider};
pub use state::LlmState;
pub use types::{CompletionRequest, CompletionResponse, StreamEvent};
