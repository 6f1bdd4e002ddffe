//! Splitting completion text into streamed chunks

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::ids::CompletionIds;
use crate::types::{ASSISTANT_ROLE, FinishReason, StreamDelta, unix_timestamp};

/// Separator tokens are split on and re-appended to
const SEPARATOR: char = ' ';

/// Split text on every single space and re-append the space to each token
///
/// Runs of spaces produce empty tokens, and empty text produces one empty
/// token, so the result is never empty.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(SEPARATOR).map(|token| format!("{token}{SEPARATOR}")).collect()
}

/// Lazy, ordered sequence of chunks for one completion
///
/// The first chunk carries the assistant role and the last carries
/// `finish_reason: stop`; a single-token text gets both on one chunk.
/// Timestamps are sampled as each chunk is produced. Once exhausted the
/// framer cannot be replayed.
#[derive(Debug)]
pub struct ChunkFramer {
    tokens: Peekable<IntoIter<String>>,
    ids: CompletionIds,
    position: usize,
}

impl ChunkFramer {
    pub fn new(text: &str, ids: CompletionIds) -> Self {
        Self {
            tokens: tokenize(text).into_iter().peekable(),
            ids,
            position: 0,
        }
    }
}

impl Iterator for ChunkFramer {
    type Item = StreamDelta;

    fn next(&mut self) -> Option<Self::Item> {
        let content = self.tokens.next()?;
        let position = self.position;
        self.position += 1;

        let is_last = self.tokens.peek().is_none();

        Some(StreamDelta {
            position,
            id: self.ids.chunk(position),
            created: unix_timestamp(),
            role: (position == 0).then(|| ASSISTANT_ROLE.to_owned()),
            content,
            finish_reason: is_last.then_some(FinishReason::Stop),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tokens.size_hint()
    }
}

impl ExactSizeIterator for ChunkFramer {}
