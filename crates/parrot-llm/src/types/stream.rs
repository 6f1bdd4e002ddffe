use super::response::FinishReason;

/// Event produced by a completion stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// One framed content chunk
    Delta(StreamDelta),
    /// Stream has completed; nothing follows
    Done,
}

/// One chunk of a streamed completion
///
/// Carries its own id and timestamp because both are decided per chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDelta {
    /// Position of this chunk in its stream, starting at zero
    pub position: usize,
    /// Chunk identifier
    pub id: String,
    /// Unix timestamp sampled when the chunk was framed
    pub created: u64,
    /// Author role, present on the first chunk only
    pub role: Option<String>,
    /// Token text including its trailing separator
    pub content: String,
    /// Present on the last chunk only
    pub finish_reason: Option<FinishReason>,
}
