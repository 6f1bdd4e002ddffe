#![allow(dead_code)]

pub mod config;
pub mod server;

/// Request body for a single-message conversation
pub fn chat_body(model: &str, content: &str, stream: bool) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [{"role": "user", "content": content}],
        "stream": stream
    })
}

/// Payloads of every `data:` line in an SSE body, in order
pub fn sse_data(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(str::to_owned)
        .collect()
}

/// Parse every event except the final `[DONE]` marker as a chunk
pub fn sse_chunks(text: &str) -> Vec<serde_json::Value> {
    sse_data(text)
        .iter()
        .filter(|data| data.as_str() != "[DONE]")
        .map(|data| serde_json::from_str(data).expect("chunk is JSON"))
        .collect()
}
