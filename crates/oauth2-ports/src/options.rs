use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use oauth2_core::{OAuth2Error, Request, Response, User};

/// Arbitrary engine options forwarded verbatim.
pub type ExtraOptions = serde_json::Map<String, serde_json::Value>;

/// Options for the token endpoint. `None` means "use the engine settings".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenOptions {
    pub access_token_lifetime: Option<u64>,
    pub refresh_token_lifetime: Option<u64>,
    pub allow_extended_token_attributes: Option<bool>,
    pub always_issue_new_refresh_token: Option<bool>,
    pub require_client_authentication: HashMap<String, bool>,
    #[serde(flatten)]
    pub extra: ExtraOptions,
}

/// Options for bearer-token authentication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticateOptions {
    /// Scope the token must cover, space separated.
    pub scope: Option<String>,
    pub add_accepted_scopes_header: Option<bool>,
    pub add_authorized_scopes_header: Option<bool>,
    pub allow_bearer_tokens_in_query_string: Option<bool>,
    #[serde(flatten)]
    pub extra: ExtraOptions,
}

/// Options for the authorization endpoint.
///
/// The authenticate handler is never read from configuration; the adapter supplies it.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizeOptions {
    pub authorization_code_lifetime: Option<u64>,
    pub allow_empty_state: Option<bool>,
    #[serde(skip)]
    pub authenticate_handler: Option<Arc<dyn AuthenticateHandler>>,
    #[serde(flatten)]
    pub extra: ExtraOptions,
}

impl AuthorizeOptions {
    /// A copy of these options carrying `handler`; `self` is left untouched.
    pub fn with_authenticate_handler(&self, handler: Arc<dyn AuthenticateHandler>) -> Self {
        Self {
            authenticate_handler: Some(handler),
            ..self.clone()
        }
    }
}

impl fmt::Debug for AuthorizeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizeOptions")
            .field(
                "authorization_code_lifetime",
                &self.authorization_code_lifetime,
            )
            .field("allow_empty_state", &self.allow_empty_state)
            .field(
                "authenticate_handler",
                &self.authenticate_handler.as_ref().map(|_| "<handler>"),
            )
            .field("extra", &self.extra)
            .finish()
    }
}

/// Resolves the resource owner while the engine runs the authorization-code flow.
#[async_trait]
pub trait AuthenticateHandler: Send + Sync {
    async fn handle(&self, request: &Request, response: &Response) -> Result<User, OAuth2Error>;
}
