//! Mapping between a framework [`Context`] and the engine's neutral request/response.

use oauth2_core::{Request, Response};

use crate::Context;

/// Snapshot the framework request. Missing query/body become empty maps.
pub fn to_neutral_request<C: Context + ?Sized>(ctx: &C) -> Request {
    Request::from_parts(ctx.request_parts())
}

/// A fresh response for the engine to write into: `200`, no headers, no body.
pub fn neutral_response() -> Response {
    Response::new()
}

/// Copy body, status and headers of `response` onto the framework response.
pub fn apply_response<C: Context + ?Sized>(ctx: &mut C, response: &Response) {
    ctx.set_body(response.body.clone());
    ctx.set_status(response.status);
    ctx.merge_headers(&response.headers);
}
