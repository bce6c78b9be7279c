//! Integration ports for the OAuth2 middleware adapter.
//!
//! Implement [`Model`] to plug in persistence and credential checks, and
//! [`AuthorizationEngine`] to plug in the grant logic itself.

pub mod engine;
pub mod model;
pub mod options;

pub use engine::*;
pub use model::*;
pub use options::*;
