use async_trait::async_trait;
use std::fmt;

use oauth2_config::EngineSettings;
use oauth2_core::{AuthorizationCode, OAuth2Error, Request, Response, Token};

use crate::{AuthenticateOptions, AuthorizeOptions, DynModel, TokenOptions};

/// Everything an engine is constructed from: adapter settings merged with the model.
#[derive(Clone)]
pub struct EngineOptions {
    pub settings: EngineSettings,
    pub model: DynModel,
}

impl EngineOptions {
    pub fn new(settings: EngineSettings, model: DynModel) -> Self {
        Self { settings, model }
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// The delegated authorization server: grant validation, token/code issuance and bearer-token
/// verification.
///
/// Operations read the neutral request and may write status, headers and body into the neutral
/// response, including before failing (e.g. a `WWW-Authenticate` challenge).
#[async_trait]
pub trait AuthorizationEngine: Send + Sync + 'static {
    fn from_options(options: EngineOptions) -> Result<Self, OAuth2Error>
    where
        Self: Sized;

    /// The model this engine was built with.
    fn model(&self) -> &DynModel;

    async fn token(
        &self,
        request: &Request,
        response: &mut Response,
        options: &TokenOptions,
    ) -> Result<Token, OAuth2Error>;

    async fn authorize(
        &self,
        request: &Request,
        response: &mut Response,
        options: &AuthorizeOptions,
    ) -> Result<AuthorizationCode, OAuth2Error>;

    async fn authenticate(
        &self,
        request: &Request,
        response: &mut Response,
        options: &AuthenticateOptions,
    ) -> Result<Token, OAuth2Error>;
}
