//! Framework-neutral OAuth2 middleware flow.
//!
//! [`OAuth2`] wires a framework [`Context`] to an [`AuthorizationEngine`]:
//! the request is adapted into a neutral [`Request`], the engine runs, and the outcome is either
//! attached to request state ([`Flow::Continue`]) or translated into an HTTP error response
//! ([`Flow::Halt`]). Framework bindings (see `oauth2-actix`) only implement [`Context`] and map
//! [`Flow`] onto their own middleware chain.
//!
//! [`AuthorizationEngine`]: oauth2_ports::AuthorizationEngine
//! [`Request`]: oauth2_core::Request

pub mod adapter;
pub mod context;
pub mod handler;
pub mod protocol;
pub mod translate;

pub use adapter::*;
pub use context::*;
pub use handler::*;
pub use translate::handle_error;

#[cfg(test)]
mod testing;
