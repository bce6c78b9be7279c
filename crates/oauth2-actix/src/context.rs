use actix_web::dev::ServiceRequest;
use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::BTreeMap;

use oauth2_adapter::Context;
use oauth2_core::{OAuth2Error, OAuthState, RequestParts, Response};
use oauth2_events::{ErrorBusHandle, ErrorEvent};

use crate::protocol;

/// Per-request [`Context`] over an actix `ServiceRequest`.
///
/// Holds a snapshot of the incoming request, the outgoing response under construction and the
/// result envelope. Model factories can reach app data, extensions or the session through
/// [`ActixContext::http_request`].
pub struct ActixContext {
    request: HttpRequest,
    method: http::Method,
    headers: http::HeaderMap,
    query: BTreeMap<String, String>,
    body: Option<BTreeMap<String, String>>,
    response: Response,
    state: Option<OAuthState>,
}

impl ActixContext {
    /// Snapshot `req`. Form and JSON bodies are buffered and re-installed, so downstream services
    /// can still read them; any other body is left alone and seen as absent. Never fails.
    pub async fn from_service_request(req: &mut ServiceRequest) -> Self {
        let body = match protocol::read_body(req).await {
            Some(bytes) => {
                let content_type = req
                    .headers()
                    .get(actix_web::http::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok());
                protocol::parse_body(content_type, &bytes)
            }
            None => None,
        };

        Self {
            method: protocol::method_to_neutral(req.method()),
            headers: protocol::headers_to_neutral(req.headers()),
            query: protocol::parse_query(req.query_string()),
            body,
            request: req.request().clone(),
            response: Response::new(),
            state: None,
        }
    }

    pub fn http_request(&self) -> &HttpRequest {
        &self.request
    }

    /// The outgoing response as written so far.
    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn oauth_state(&self) -> Option<&OAuthState> {
        self.state.as_ref()
    }

    pub fn into_http_response(self) -> HttpResponse {
        protocol::to_http_response(&self.response)
    }

    pub(crate) fn into_parts(self) -> (Option<OAuthState>, Response) {
        (self.state, self.response)
    }
}

impl Context for ActixContext {
    fn request_parts(&self) -> RequestParts<'_> {
        RequestParts {
            method: &self.method,
            headers: &self.headers,
            query: &self.query,
            body: self.body.as_ref(),
        }
    }

    fn set_status(&mut self, status: http::StatusCode) {
        self.response.status = status;
    }

    fn set_body(&mut self, body: Option<serde_json::Value>) {
        self.response.body = body;
    }

    fn merge_headers(&mut self, headers: &http::HeaderMap) {
        oauth2_core::merge_headers(&mut self.response.headers, headers);
    }

    fn set_oauth_state(&mut self, state: OAuthState) {
        self.state = Some(state);
    }

    fn emit_error(&self, error: &OAuth2Error) {
        let mut event = ErrorEvent::from_error(error)
            .with_request(self.request.method().as_str(), self.request.path());
        if let Some(route) = self.request.match_pattern() {
            event = event.with_attribute("route", route);
        }

        match self.request.app_data::<web::Data<ErrorBusHandle>>() {
            Some(bus) => bus.emit_best_effort(event),
            None => tracing::debug!(
                event_id = %event.id,
                "no error bus registered; oauth2 error only logged"
            ),
        }
    }
}
