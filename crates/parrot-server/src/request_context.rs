use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::HeaderValue;
use parrot_core::RequestContext;

/// Header echoing the id assigned to each request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that attaches a fresh `RequestContext` to the incoming request
///
/// The generated request id is also returned to the client in the
/// `x-request-id` response header.
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let context = RequestContext::from_parts(&parts);
    let request_id = context.request_id;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
