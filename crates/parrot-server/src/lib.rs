mod health;
mod request_context;
mod request_log;

use std::net::SocketAddr;

use axum::Router;
use parrot_config::Config;
use parrot_llm::LlmState;
use tower_http::trace::TraceLayer;

pub use request_context::REQUEST_ID_HEADER;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the completion settings cannot be turned into a provider
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address();
        let llm_state = LlmState::from_config(&config.completions)?;

        let mut app = health::health_routes(&config.server.health);

        // Completion and model routes
        app = app.merge(parrot_llm::llm_router(llm_state));

        // Apply middleware layers (innermost first)

        // Request context (innermost, runs just before handlers)
        app = app.layer(axum::middleware::from_fn(request_context::request_context_middleware));

        if config.server.log_requests {
            app = app.layer(axum::middleware::from_fn(request_log::request_log_middleware));
        }

        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. In-flight streams are
    /// allowed to finish before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;

    fn router(raw: &str) -> Router {
        let config = Config::from_toml(raw).unwrap();
        Server::new(config).unwrap().into_router()
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let response = router("")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert_eq!(id.len(), 36);
    }

    #[tokio::test]
    async fn completion_survives_request_logging() {
        let body = serde_json::json!({
            "model": "logged",
            "messages": [{"role": "user", "content": "hi"}]
        });

        let response = router("[server]\nlog_requests = true\n")
            .oneshot(
                Request::post("/v1/chat/completions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["model"], "logged");
    }

    #[tokio::test]
    async fn health_route_can_be_moved() {
        let app = router("[server.health]\npath = \"/status\"\n");

        let moved = app
            .clone()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(moved.status(), StatusCode::OK);

        let old = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(old.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn listen_address_defaults() {
        let server = Server::new(Config::default()).unwrap();
        assert_eq!(server.listen_address(), parrot_config::DEFAULT_LISTEN_ADDRESS);
    }
}
