use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;
use http::StatusCode;
use parrot_config::HealthConfig;

/// Routes for the health endpoint, empty when it is disabled
pub fn health_routes(config: &HealthConfig) -> Router {
    if !config.enabled {
        return Router::new();
    }

    Router::new().route(&config.path, get(health_handler))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
