use http::{HeaderMap, StatusCode};

use oauth2_core::{OAuth2Error, OAuthState, RequestParts};

/// What the middleware needs from the host framework for one request.
///
/// An implementation wraps the framework's request/response pair: it exposes the incoming
/// request, accepts writes to the outgoing response, holds the per-request state bag and knows
/// how to reach the application-wide error emitter.
pub trait Context {
    /// Borrowed view of the incoming request. Must not change between calls unless the
    /// framework request itself changed.
    fn request_parts(&self) -> RequestParts<'_>;

    fn set_status(&mut self, status: StatusCode);

    /// `None` clears any body written so far.
    fn set_body(&mut self, body: Option<serde_json::Value>);

    /// Per-name replace: a name present in `headers` overwrites what the response had.
    fn merge_headers(&mut self, headers: &HeaderMap);

    /// Store the result envelope under [`oauth2_core::OAUTH_STATE_KEY`].
    fn set_oauth_state(&mut self, state: OAuthState);

    /// Report `error` application-wide. Must not fail.
    fn emit_error(&self, error: &OAuth2Error);
}
