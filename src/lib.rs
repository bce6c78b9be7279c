//! OAuth2 authorization-server middleware for actix-web.
//!
//! Three entry points wrap an [`AuthorizationEngine`]:
//!
//! - `token` issues tokens and renders the engine's response,
//! - `authorize` issues authorization codes, resolving the resource owner through the model,
//! - `authenticate` verifies bearer tokens.
//!
//! The framework-neutral flow lives in `oauth2-adapter`; `oauth2-actix` maps it onto actix
//! middleware. [`bootstrap`] wires configuration, logging, the error bus and metrics the way a
//! host application usually wants them.
//!
//! [`AuthorizationEngine`]: oauth2_ports::AuthorizationEngine

pub mod bootstrap;

pub use oauth2_actix::{ActixContext, OAuth, OAuth2Middleware, OAuthResponse};
pub use oauth2_adapter::{handle_error, Context, Endpoint, Flow, OAuth2, OAuth2Builder};
pub use oauth2_config::{Config, EngineSettings};
pub use oauth2_core::{
    AuthorizationCode, Client, ErrorKind, OAuth2Error, OAuthState, Request, Response, Token,
    TokenResponse, User, OAUTH_STATE_KEY,
};
pub use oauth2_events::{BroadcastErrorBus, ErrorBusHandle, ErrorEvent};
pub use oauth2_observability::Metrics;
pub use oauth2_ports::{
    AuthenticateHandler, AuthenticateOptions, AuthorizationEngine, AuthorizeOptions, DynModel,
    EngineOptions, Model, ModelFactory, TokenOptions,
};
