use async_trait::async_trait;

use oauth2_core::{OAuth2Error, Request, Response, User};
use oauth2_ports::{AuthenticateHandler, DynModel};

/// Authenticate handler injected into `authorize`: resolves the resource owner from the
/// `username`/`password` fields of the request body through [`Model::get_user`].
///
/// [`Model::get_user`]: oauth2_ports::Model::get_user
pub struct ResourceOwnerAuthenticator {
    model: DynModel,
}

impl ResourceOwnerAuthenticator {
    pub fn new(model: DynModel) -> Self {
        Self { model }
    }
}

#[async_trait]
impl AuthenticateHandler for ResourceOwnerAuthenticator {
    async fn handle(&self, request: &Request, _response: &Response) -> Result<User, OAuth2Error> {
        let username = request
            .body_param("username")
            .ok_or_else(|| OAuth2Error::invalid_request("Missing parameter: `username`"))?;
        let password = request
            .body_param("password")
            .ok_or_else(|| OAuth2Error::invalid_request("Missing parameter: `password`"))?;

        let user = self.model.get_user(username, password).await?;

        user.ok_or_else(|| {
            tracing::debug!(username = %username, "resource owner lookup returned no user");
            OAuth2Error::access_denied("Access denied: user credentials are invalid")
        })
    }
}
