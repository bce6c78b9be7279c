use oauth2_core::{ErrorKind, OAuth2Error, Response};

use crate::Context;

/// Terminal failure handler shared by every entry point.
///
/// Headers from `response` (what the engine wrote before failing) and from the error itself are
/// merged first, so challenges such as `WWW-Authenticate` survive. `Unauthorized` errors then get
/// a status and nothing else; all others get the `{ error, error_description }` body. Every error
/// is emitted application-wide exactly once.
pub fn handle_error<C: Context + ?Sized>(
    ctx: &mut C,
    error: &OAuth2Error,
    response: Option<&Response>,
) {
    if let Some(response) = response {
        ctx.merge_headers(&response.headers);
    }
    if !error.headers.is_empty() {
        ctx.merge_headers(&error.headers);
    }

    match error.kind {
        ErrorKind::Unauthorized => {
            ctx.set_status(error.code);
        }
        ErrorKind::Reported => {
            match serde_json::to_value(error.body()) {
                Ok(body) => ctx.set_body(Some(body)),
                Err(err) => {
                    tracing::error!(error = %err, "failed to serialize oauth2 error body");
                }
            }
            ctx.set_status(error.code);
        }
    }

    if error.code.is_server_error() {
        tracing::error!(
            error = %error.error,
            error_description = %error.error_description,
            status = error.code.as_u16(),
            "oauth2 request failed"
        );
    } else {
        tracing::warn!(
            error = %error.error,
            error_description = %error.error_description,
            status = error.code.as_u16(),
            "oauth2 request rejected"
        );
    }

    ctx.emit_error(error);
}
