//! Actix-web binding for the OAuth2 middleware adapter.
//!
//! All actix-specific code lives here: turning a `ServiceRequest`
//! into a [`Context`](oauth2_adapter::Context), wrapping the entry points as a `Transform`, and
//! the extractors downstream handlers use to read the outcome.

pub mod context;
pub mod extract;
pub mod middleware;
pub mod protocol;

pub use context::ActixContext;
pub use extract::{OAuth, OAuthResponse};
pub use middleware::OAuth2Middleware;
