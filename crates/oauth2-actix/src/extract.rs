use actix_web::body::BoxBody;
use actix_web::dev::Payload;
use actix_web::error::ErrorInternalServerError;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, Responder};
use futures::future::{ready, Ready};
use std::ops::Deref;

use oauth2_core::{OAuthState, Response};

use crate::protocol;

/// The result envelope left by an OAuth2 middleware (`oauth` state).
///
/// Fails with `500` on routes not wrapped by a successful entry point.
#[derive(Debug, Clone)]
pub struct OAuth(pub OAuthState);

impl Deref for OAuth {
    type Target = OAuthState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OAuth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<OAuthState>()
                .cloned()
                .map(OAuth)
                .ok_or_else(|| {
                    ErrorInternalServerError("oauth2 state missing: route not wrapped by OAuth2Middleware")
                }),
        )
    }
}

/// The response an OAuth2 middleware staged (for `token`, the engine's token response).
///
/// Returning it from a handler renders it verbatim.
#[derive(Debug, Clone)]
pub struct OAuthResponse(pub Response);

impl FromRequest for OAuthResponse {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Response>()
                .cloned()
                .map(OAuthResponse)
                .ok_or_else(|| {
                    ErrorInternalServerError("oauth2 response missing: route not wrapped by OAuth2Middleware")
                }),
        )
    }
}

impl Responder for OAuthResponse {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        protocol::to_http_response(&self.0)
    }
}
