use async_trait::async_trait;
use std::sync::Arc;

use oauth2_core::{AuthorizationCode, Client, OAuth2Error, Token, User};

fn missing(capability: &str) -> OAuth2Error {
    OAuth2Error::invalid_argument(&format!(
        "Invalid argument: model does not implement `{}()`",
        capability
    ))
}

/// Capability set the engine calls into for persistence and credential checks.
///
/// Only [`Model::get_user`] is needed by the adapter itself (resource-owner lookup during the
/// authorization-code flow). Everything else is whatever the engine's grants require; the
/// defaults fail with `invalid_argument` naming the missing capability.
#[async_trait]
pub trait Model: Send + Sync {
    /// Resolve a resource owner from credentials. `Ok(None)` means "no such user".
    async fn get_user(&self, username: &str, password: &str)
        -> Result<Option<User>, OAuth2Error>;

    async fn get_client(
        &self,
        _client_id: &str,
        _client_secret: Option<&str>,
    ) -> Result<Option<Client>, OAuth2Error> {
        Err(missing("getClient"))
    }

    async fn save_token(
        &self,
        _token: &Token,
        _client: &Client,
        _user: Option<&User>,
    ) -> Result<Token, OAuth2Error> {
        Err(missing("saveToken"))
    }

    async fn get_access_token(&self, _access_token: &str) -> Result<Option<Token>, OAuth2Error> {
        Err(missing("getAccessToken"))
    }

    async fn get_refresh_token(
        &self,
        _refresh_token: &str,
    ) -> Result<Option<Token>, OAuth2Error> {
        Err(missing("getRefreshToken"))
    }

    async fn revoke_token(&self, _token: &Token) -> Result<bool, OAuth2Error> {
        Err(missing("revokeToken"))
    }

    async fn save_authorization_code(
        &self,
        _code: &AuthorizationCode,
        _client: &Client,
        _user: &User,
    ) -> Result<AuthorizationCode, OAuth2Error> {
        Err(missing("saveAuthorizationCode"))
    }

    async fn get_authorization_code(
        &self,
        _code: &str,
    ) -> Result<Option<AuthorizationCode>, OAuth2Error> {
        Err(missing("getAuthorizationCode"))
    }

    async fn revoke_authorization_code(
        &self,
        _code: &AuthorizationCode,
    ) -> Result<bool, OAuth2Error> {
        Err(missing("revokeAuthorizationCode"))
    }

    /// Whether `token` covers `scope`. Defaults to a whitespace-separated subset check.
    async fn verify_scope(&self, token: &Token, scope: &str) -> Result<bool, OAuth2Error> {
        let granted: Vec<&str> = token
            .scope
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .collect();
        Ok(scope.split_whitespace().all(|s| granted.contains(&s)))
    }
}

pub type DynModel = Arc<dyn Model>;

/// Builds the model from the framework context of the call that first needs an engine.
///
/// This is how the model reaches framework-specific state (app data, session, extensions).
pub trait ModelFactory<C: ?Sized>: Send + Sync {
    fn create(&self, ctx: &C) -> Result<DynModel, OAuth2Error>;
}

impl<C, T> ModelFactory<C> for T
where
    C: ?Sized,
    T: Fn(&C) -> DynModel + Send + Sync,
{
    fn create(&self, ctx: &C) -> Result<DynModel, OAuth2Error> {
        Ok(self(ctx))
    }
}
