//! Axum route handlers for the OpenAI-compatible endpoints

use axum::body::Bytes;
use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json, Router, routing};
use futures_util::{Stream, StreamExt};
use parrot_core::{HttpError, RequestContext};
use serde::Serialize;

use crate::convert;
use crate::error::LlmError;
use crate::protocol::openai::{ChatCompletion, ChatRequest, ErrorBody, ErrorDetail, ModelCard, ModelList};
use crate::provider::CompletionStream;
use crate::state::LlmState;
use crate::types::{StreamEvent, unix_timestamp};

/// Data payload that terminates every stream
pub const DONE_MARKER: &str = "[DONE]";

/// Build the completion router with all endpoints
pub fn llm_router(state: LlmState) -> Router {
    Router::new()
        .route("/chat/completions", routing::post(chat_completions))
        .route("/v1/chat/completions", routing::post(chat_completions))
        .route("/v1/models", routing::get(list_models))
        .with_state(state)
}

/// Handle `POST /chat/completions` and `POST /v1/chat/completions`
///
/// The body is parsed by hand so clients that omit `content-type` are
/// still served.
async fn chat_completions(
    State(state): State<LlmState>,
    context: Option<Extension<RequestContext>>,
    body: Bytes,
) -> Response {
    let context = context.map_or_else(RequestContext::empty, |Extension(context)| context);

    let wire_request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return error_response(LlmError::InvalidRequest(e.to_string())),
    };

    let request = wire_request.into_completion_request(state.default_model());

    tracing::debug!(
        request_id = %context.request_id,
        model = %request.model,
        messages = request.messages.len(),
        max_tokens = request.params.max_tokens,
        temperature = request.params.temperature,
        stream = request.stream,
        "parsed completion request"
    );

    if request.stream {
        let model = request.model.clone();
        match state.complete_stream(request, context).await {
            Ok(stream) => sse_response(stream, model, state).into_response(),
            Err(e) => error_response(e),
        }
    } else {
        match state.complete(request, context).await {
            Ok(response) => {
                let wire_response: ChatCompletion = response.into();
                Json(wire_response).into_response()
            }
            Err(e) => error_response(e),
        }
    }
}

/// Handle `GET /v1/models`
async fn list_models(State(state): State<LlmState>) -> Response {
    let response = ModelList {
        object: "list",
        data: vec![ModelCard {
            id: state.default_model().to_owned(),
            object: "model",
            created: unix_timestamp(),
            owned_by: "parrot",
        }],
    };

    Json(response).into_response()
}

/// Build a streaming SSE response in `OpenAI` format
///
/// Each chunk becomes one `data: <json>` event and the stream ends with
/// `data: [DONE]`. No keep-alive comments are interleaved.
fn sse_response(
    stream: CompletionStream,
    model: String,
    state: LlmState,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let event_stream = stream.map(move |result| match result {
        Ok(StreamEvent::Delta(delta)) => {
            state.metrics().record_chunk(&model);
            json_event(&convert::openai::delta_to_chunk(delta, &model))
        }
        Ok(StreamEvent::Done) => Ok(Event::default().data(DONE_MARKER)),
        Err(e) => {
            tracing::warn!(error = %e, "completion stream failed");
            json_event(&error_body(&e))
        }
    });

    Sse::new(event_stream)
}

/// Encode one SSE `data:` payload as compact JSON
///
/// An encoding failure ends the stream instead of sending an empty event.
fn json_event<T: Serialize>(payload: &T) -> Result<Event, axum::Error> {
    Event::default().json_data(payload).inspect_err(|e| {
        tracing::error!(error = %e, "failed to encode stream event");
    })
}

/// Render an error as a JSON error response with its HTTP status
#[allow(clippy::needless_pass_by_value)]
fn error_response(error: LlmError) -> Response {
    let status = error.status_code();

    if error.is_client_error() {
        tracing::debug!(error = %error, %status, "completion rejected");
    } else {
        tracing::error!(error = %error, "completion failed");
    }

    (status, Json(error_body(&error))).into_response()
}

fn error_body(error: &LlmError) -> ErrorBody {
    ErrorBody {
        error: ErrorDetail {
            message: error.client_message(),
            error_type: error.error_type(),
            code: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use parrot_config::{CompletionsConfig, IdStrategy};
    use tower::ServiceExt;

    use super::*;

    fn router(id_strategy: IdStrategy) -> Router {
        let config = CompletionsConfig {
            chunk_delay: "0ms".to_owned(),
            id_strategy,
            ..CompletionsConfig::default()
        };
        llm_router(LlmState::from_config(&config).unwrap())
    }

    async fn post(router: Router, path: &str, body: serde_json::Value) -> (StatusCode, String) {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn atomic_completion() {
        let (status, body) = post(
            router(IdStrategy::Legacy),
            "/chat/completions",
            serde_json::json!({"messages": [{"role": "user", "content": "hello there"}]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["id"], "chatcmpl-1337");
        assert_eq!(json["object"], "chat.completion");
        assert_eq!(json["model"], "mock-gpt-model");
        assert_eq!(
            json["choices"][0]["message"]["content"],
            "As a mock AI Assistant, I can only echo your last message: hello there"
        );
        assert_eq!(json["choices"][0]["finish_reason"], "stop");
        assert_eq!(
            json["usage"],
            serde_json::json!({"prompt_tokens": 0, "completion_tokens": 0, "total_tokens": 0})
        );
    }

    #[tokio::test]
    async fn streamed_body_is_framed_byte_for_byte() {
        let (status, body) = post(
            router(IdStrategy::Legacy),
            "/v1/chat/completions",
            serde_json::json!({"messages": [{"role": "user", "content": ""}], "stream": true}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let events: Vec<&str> = body.split_terminator("\n\n").collect();
        assert_eq!(events.len(), 14);
        assert!(events[0].starts_with(r#"data: {"id":"chatcmpl-0","object":"chat.completion.chunk","created":"#));
        assert!(events[0].ends_with(
            r#""model":"mock-gpt-model","choices":[{"index":0,"delta":{"role":"assistant","content":"As "},"finish_reason":null}]}"#
        ));
        assert!(events[12].ends_with(r#""choices":[{"index":0,"delta":{"content":" "},"finish_reason":"stop"}]}"#));
        assert_eq!(events[13], "data: [DONE]");
        assert!(body.ends_with("data: [DONE]\n\n"));
    }

    #[tokio::test]
    async fn stream_echoes_requested_model() {
        let (_, body) = post(
            router(IdStrategy::Unique),
            "/chat/completions",
            serde_json::json!({"model": "gpt-4o-mini", "messages": [{"role": "user", "content": "hi"}], "stream": true}),
        )
        .await;

        let chunks: Vec<serde_json::Value> = body
            .lines()
            .filter_map(|line| line.strip_prefix("data: "))
            .filter(|data| *data != DONE_MARKER)
            .map(|data| serde_json::from_str(data).unwrap())
            .collect();

        assert!(chunks.iter().all(|c| c["model"] == "gpt-4o-mini"));
        assert!(chunks.iter().all(|c| c["id"] == chunks[0]["id"]));
    }

    #[tokio::test]
    async fn empty_messages_are_rejected_in_both_modes() {
        for stream in [false, true] {
            let (status, body) = post(
                router(IdStrategy::Unique),
                "/chat/completions",
                serde_json::json!({"messages": [], "stream": stream}),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            let json: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["error"]["message"], "no messages provided");
            assert_eq!(json["error"]["type"], "invalid_request_error");
        }
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let request = Request::post("/chat/completions")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router(IdStrategy::Unique).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_messages_field_is_rejected() {
        let (status, body) = post(
            router(IdStrategy::Unique),
            "/chat/completions",
            serde_json::json!({"model": "mock-gpt-model"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("missing field `messages`"), "{body}");
    }

    #[tokio::test]
    async fn lists_default_model() {
        let request = Request::get("/v1/models").body(Body::empty()).unwrap();
        let response = router(IdStrategy::Unique).oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["object"], "list");
        assert_eq!(json["data"][0]["id"], "mock-gpt-model");
    }

    #[tokio::test]
    async fn any_integer_max_tokens_is_served() {
        for max_tokens in [-1_i64, 5_000_000_000] {
            let (status, _) = post(
                router(IdStrategy::Unique),
                "/chat/completions",
                serde_json::json!({"messages": [{"role": "user", "content": "hi"}], "max_tokens": max_tokens}),
            )
            .await;

            assert_eq!(status, StatusCode::OK, "max_tokens = {max_tokens}");
        }
    }

    #[test]
    fn unencodable_payload_is_an_error() {
        struct Unencodable;

        impl Serialize for Unencodable {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("refusing to encode"))
            }
        }

        assert!(json_event(&Unencodable).is_err());
        assert!(json_event(&serde_json::json!({"ok": true})).is_ok());
    }

    #[tokio::test]
    async fn stream_errors_become_error_events() {
        let state = LlmState::from_config(&CompletionsConfig::default()).unwrap();
        let stream: CompletionStream = Box::pin(futures_util::stream::iter([Err(LlmError::Internal(
            anyhow::anyhow!("framer exploded"),
        ))]));

        let response = sse_response(stream, "mock-gpt-model".to_owned(), state).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        assert_eq!(
            body,
            "data: {\"error\":{\"message\":\"an internal error occurred\",\"type\":\"internal_error\",\"code\":null}}\n\n"
        );
    }
}
