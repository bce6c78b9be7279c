use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use oauth2_adapter::{Endpoint, Flow, OAuth2};
use oauth2_ports::{
    AuthenticateOptions, AuthorizationEngine, AuthorizeOptions, ModelFactory, TokenOptions,
};

use crate::{protocol, ActixContext};

/// One adapter entry point as an actix `Transform`.
///
/// On success the result envelope ([`OAuthState`](oauth2_core::OAuthState)) and the staged
/// response are put into request extensions and the wrapped service runs. Headers the entry
/// point staged are added to the downstream response unless downstream set them itself. On
/// failure the translated error response is returned and the wrapped service is skipped.
///
/// Several middlewares built from the same `Arc<OAuth2>` share one engine.
pub struct OAuth2Middleware<E, F> {
    adapter: Arc<OAuth2<E, F>>,
    endpoint: Endpoint,
}

impl<E, F> Clone for OAuth2Middleware<E, F> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            endpoint: self.endpoint.clone(),
        }
    }
}

impl<E, F> OAuth2Middleware<E, F> {
    pub fn new(adapter: Arc<OAuth2<E, F>>, endpoint: Endpoint) -> Self {
        Self { adapter, endpoint }
    }

    /// The token endpoint.
    ///
    /// On success the engine's token response (status, body, headers) is only staged. Its headers
    /// are added to whatever downstream returns, but its status and body reach the client only if
    /// the wrapped handler returns the [`OAuthResponse`](crate::OAuthResponse) extractor; any other
    /// handler response replaces them.
    pub fn token(adapter: &Arc<OAuth2<E, F>>, options: TokenOptions) -> Self {
        Self::new(Arc::clone(adapter), Endpoint::Token(options))
    }

    pub fn authorize(adapter: &Arc<OAuth2<E, F>>, options: AuthorizeOptions) -> Self {
        Self::new(Arc::clone(adapter), Endpoint::Authorize(options))
    }

    pub fn authenticate(adapter: &Arc<OAuth2<E, F>>, options: AuthenticateOptions) -> Self {
        Self::new(Arc::clone(adapter), Endpoint::Authenticate(options))
    }
}

impl<S, B, E, F> Transform<S, ServiceRequest> for OAuth2Middleware<E, F>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    E: AuthorizationEngine,
    F: ModelFactory<ActixContext> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OAuth2MiddlewareService<S, E, F>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OAuth2MiddlewareService {
            service: Rc::new(service),
            adapter: Arc::clone(&self.adapter),
            endpoint: Rc::new(self.endpoint.clone()),
        }))
    }
}

pub struct OAuth2MiddlewareService<S, E, F> {
    service: Rc<S>,
    adapter: Arc<OAuth2<E, F>>,
    endpoint: Rc<Endpoint>,
}

impl<S, B, E, F> Service<ServiceRequest> for OAuth2MiddlewareService<S, E, F>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    E: AuthorizationEngine,
    F: ModelFactory<ActixContext> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let adapter = Arc::clone(&self.adapter);
        let endpoint = Rc::clone(&self.endpoint);

        Box::pin(async move {
            let mut ctx = ActixContext::from_service_request(&mut req).await;

            match adapter.dispatch(&endpoint, &mut ctx).await {
                Flow::Halt => {
                    tracing::debug!(
                        endpoint = endpoint.name(),
                        path = %req.path(),
                        "oauth2 middleware halted the request"
                    );
                    let response = ctx.into_http_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
                Flow::Continue => {
                    let (state, staged) = ctx.into_parts();
                    if let Some(state) = state {
                        req.extensions_mut().insert(state);
                    }
                    let staged_headers = staged.headers.clone();
                    req.extensions_mut().insert(staged);

                    let mut res = svc.call(req).await?;
                    protocol::merge_missing_headers(res.headers_mut(), &staged_headers);
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}
