//! Completion and chunk identifiers

use parrot_config::IdStrategy;
use parrot_core::RequestContext;

/// Fixed id of every atomic completion under [`IdStrategy::Legacy`]
const LEGACY_COMPLETION_ID: &str = "chatcmpl-1337";

/// Id source for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionIds {
    /// One id shared by the completion and every chunk of its stream
    Shared(String),
    /// Constant completion id, chunk ids numbered by position
    Positional,
}

impl CompletionIds {
    /// Pick ids for a request according to the configured strategy
    pub fn for_request(strategy: IdStrategy, context: &RequestContext) -> Self {
        match strategy {
            IdStrategy::Unique => Self::Shared(format!("chatcmpl-{}", context.simple_id())),
            IdStrategy::Legacy => Self::Positional,
        }
    }

    /// Id of an atomic completion
    pub fn completion(&self) -> String {
        match self {
            Self::Shared(id) => id.clone(),
            Self::Positional => LEGACY_COMPLETION_ID.to_owned(),
        }
    }

    /// Id of the chunk at `position` in a stream
    pub fn chunk(&self, position: usize) -> String {
        match self {
            Self::Shared(id) => id.clone(),
            Self::Positional => format!("chatcmpl-{position}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_are_shared_within_a_request() {
        let context = RequestContext::empty();
        let ids = CompletionIds::for_request(IdStrategy::Unique, &context);

        let expected = format!("chatcmpl-{}", context.simple_id());
        assert_eq!(ids.completion(), expected);
        assert_eq!(ids.chunk(0), expected);
        assert_eq!(ids.chunk(7), expected);
    }

    #[test]
    fn unique_ids_differ_across_requests() {
        let first = CompletionIds::for_request(IdStrategy::Unique, &RequestContext::empty());
        let second = CompletionIds::for_request(IdStrategy::Unique, &RequestContext::empty());
        assert_ne!(first.completion(), second.completion());
    }

    #[test]
    fn legacy_ids_follow_position() {
        let ids = CompletionIds::for_request(IdStrategy::Legacy, &RequestContext::empty());

        assert_eq!(ids.completion(), "chatcmpl-1337");
        assert_eq!(ids.chunk(0), "chatcmpl-0");
        assert_eq!(ids.chunk(12), "chatcmpl-12");
    }
}
