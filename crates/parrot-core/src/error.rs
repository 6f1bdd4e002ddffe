use http::StatusCode;

/// Domain error that knows how it surfaces over HTTP
///
/// Feature crates implement this so handlers can build an error body without
/// matching on concrete variants.
pub trait HttpError: std::error::Error {
    fn status_code(&self) -> StatusCode;

    /// Value of the `type` field in the error body, e.g. `invalid_request_error`
    fn error_type(&self) -> &'static str;

    /// Text for the `message` field; must not leak internals
    fn client_message(&self) -> String;

    /// Whether the caller is at fault
    fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
