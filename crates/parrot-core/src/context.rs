use uuid::Uuid;

/// Per-request runtime context
///
/// Built by the server middleware for every inbound request and handed to
/// handlers through request extensions. Nothing in it outlives the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Identifier generated for this request
    pub request_id: Uuid,
    /// Client `User-Agent`, when sent
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Create a context with a fresh request id
    pub fn new(user_agent: Option<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            user_agent,
        }
    }

    /// Build a context from HTTP request parts
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        let user_agent = parts
            .headers
            .get(http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Self::new(user_agent)
    }

    /// Create a minimal context for use outside an HTTP request
    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Request id in the compact form used inside completion ids
    pub fn simple_id(&self) -> String {
        self.request_id.simple().to_string()
    }
}
