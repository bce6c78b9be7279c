//! Framework-neutral OAuth2 domain types and helpers.
//!
//! Everything here is independent of the HTTP framework hosting the middleware: the neutral
//! request/response pair handed to the authorization engine, the error catalogue, and the
//! records the engine produces.

pub mod neutral;
pub mod models;

pub use neutral::*;
pub use models::*;
