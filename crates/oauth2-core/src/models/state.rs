use serde::{Deserialize, Serialize};

use crate::{AuthorizationCode, Token};

/// Key under which the result envelope is stored in per-request state.
pub const OAUTH_STATE_KEY: &str = "oauth";

/// Outcome of a successful entry point, left for downstream middleware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OAuthState {
    /// Issued by `token`, or validated by `authenticate`.
    Token(Token),
    /// Issued by `authorize`.
    Code(AuthorizationCode),
}

impl OAuthState {
    pub fn token(&self) -> Option<&Token> {
        match self {
            OAuthState::Token(token) => Some(token),
            OAuthState::Code(_) => None,
        }
    }

    pub fn code(&self) -> Option<&AuthorizationCode> {
        match self {
            OAuthState::Code(code) => Some(code),
            OAuthState::Token(_) => None,
        }
    }
}
