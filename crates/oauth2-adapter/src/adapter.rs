use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::OnceCell;

use oauth2_config::EngineSettings;
use oauth2_core::{OAuth2Error, OAuthState};
use oauth2_observability::{Metrics, Outcome};
use oauth2_ports::{
    AuthenticateOptions, AuthorizationEngine, AuthorizeOptions, EngineOptions, ModelFactory,
    TokenOptions,
};

use crate::{handle_error, protocol, Context, ResourceOwnerAuthenticator};

/// What the host pipeline should do after an entry point returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Result attached to request state; pass control downstream.
    Continue,
    /// Response finalized by the error translator; stop the chain.
    Halt,
}

impl From<Flow> for Outcome {
    fn from(flow: Flow) -> Self {
        match flow {
            Flow::Continue => Outcome::Continue,
            Flow::Halt => Outcome::Halt,
        }
    }
}

/// An entry point together with the options it forwards to the engine.
#[derive(Debug, Clone)]
pub enum Endpoint {
    Token(TokenOptions),
    Authorize(AuthorizeOptions),
    Authenticate(AuthenticateOptions),
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Token(_) => "token",
            Endpoint::Authorize(_) => "authorize",
            Endpoint::Authenticate(_) => "authenticate",
        }
    }
}

/// The adapter: engine settings, a model factory, and the lazily built engine.
///
/// The engine is built once, on the first call that needs it, from the context of *that* call;
/// every later call reuses it whatever its own context. Treat one instance as bound to a single
/// logical context lifecycle: share it across unrelated requests only if the model does not
/// depend on per-request context. There is no way to rebuild the engine short of creating a new
/// adapter.
pub struct OAuth2<E, F> {
    settings: EngineSettings,
    model: F,
    metrics: Option<Metrics>,
    engine: OnceCell<Arc<E>>,
}

pub struct OAuth2Builder<E, F> {
    settings: EngineSettings,
    model: Option<F>,
    metrics: Option<Metrics>,
    _engine: PhantomData<fn() -> E>,
}

impl<E, F> Default for OAuth2Builder<E, F> {
    fn default() -> Self {
        Self {
            settings: EngineSettings::default(),
            model: None,
            metrics: None,
            _engine: PhantomData,
        }
    }
}

impl<E, F> OAuth2Builder<E, F>
where
    E: AuthorizationEngine,
{
    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn model(mut self, model: F) -> Self {
        self.model = Some(model);
        self
    }

    pub fn metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn build(self) -> Result<OAuth2<E, F>, OAuth2Error> {
        let mut adapter = OAuth2::new(self.settings, self.model)?;
        adapter.metrics = self.metrics;
        Ok(adapter)
    }
}

impl<E, F> OAuth2<E, F>
where
    E: AuthorizationEngine,
{
    /// Fails with `invalid_argument` when no model is given.
    pub fn new(settings: EngineSettings, model: Option<F>) -> Result<Self, OAuth2Error> {
        let model =
            model.ok_or_else(|| OAuth2Error::invalid_argument("Missing parameter: `model`"))?;

        Ok(Self {
            settings,
            model,
            metrics: None,
            engine: OnceCell::new(),
        })
    }

    pub fn builder() -> OAuth2Builder<E, F> {
        OAuth2Builder::default()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Whether the engine has been built yet.
    pub fn has_engine(&self) -> bool {
        self.engine.initialized()
    }

    /// The shared engine, built from `ctx` if this is the first call.
    pub async fn engine<C>(&self, ctx: &C) -> Result<Arc<E>, OAuth2Error>
    where
        C: ?Sized,
        F: ModelFactory<C>,
    {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                let model = self.model.create(ctx)?;
                tracing::debug!("building authorization engine");
                E::from_options(EngineOptions::new(self.settings.clone(), model)).map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(engine))
    }

    /// Token endpoint: issue a token and render the engine's response.
    #[tracing::instrument(name = "oauth2.token", skip_all)]
    pub async fn token<C>(&self, ctx: &mut C, options: &TokenOptions) -> Flow
    where
        C: Context,
        F: ModelFactory<C>,
    {
        let request = protocol::to_neutral_request(ctx);
        let mut response = protocol::neutral_response();

        let result = match self.engine(&*ctx).await {
            Ok(engine) => engine.token(&request, &mut response, options).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(token) => {
                ctx.set_oauth_state(OAuthState::Token(token));
                protocol::apply_response(ctx, &response);
                self.finish("token", None)
            }
            Err(err) => {
                handle_error(ctx, &err, Some(&response));
                self.finish("token", Some(&err))
            }
        }
    }

    /// Authorization endpoint: issue a code, resolving the resource owner through the model.
    ///
    /// The response is left untouched on success; rendering the code (usually a redirect) is
    /// downstream's job.
    #[tracing::instrument(name = "oauth2.authorize", skip_all)]
    pub async fn authorize<C>(&self, ctx: &mut C, options: &AuthorizeOptions) -> Flow
    where
        C: Context,
        F: ModelFactory<C>,
    {
        let request = protocol::to_neutral_request(ctx);
        let mut response = protocol::neutral_response();

        let result = match self.engine(&*ctx).await {
            Ok(engine) => {
                let handler = ResourceOwnerAuthenticator::new(Arc::clone(engine.model()));
                let options = options.with_authenticate_handler(Arc::new(handler));
                engine.authorize(&request, &mut response, &options).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(code) => {
                ctx.set_oauth_state(OAuthState::Code(code));
                self.finish("authorize", None)
            }
            Err(err) => {
                handle_error(ctx, &err, None);
                self.finish("authorize", Some(&err))
            }
        }
    }

    /// Bearer-token authentication. No response mutation on success.
    #[tracing::instrument(name = "oauth2.authenticate", skip_all)]
    pub async fn authenticate<C>(&self, ctx: &mut C, options: &AuthenticateOptions) -> Flow
    where
        C: Context,
        F: ModelFactory<C>,
    {
        let request = protocol::to_neutral_request(ctx);
        let mut response = protocol::neutral_response();

        let result = match self.engine(&*ctx).await {
            Ok(engine) => engine.authenticate(&request, &mut response, options).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(token) => {
                ctx.set_oauth_state(OAuthState::Token(token));
                self.finish("authenticate", None)
            }
            Err(err) => {
                handle_error(ctx, &err, None);
                self.finish("authenticate", Some(&err))
            }
        }
    }

    pub async fn dispatch<C>(&self, endpoint: &Endpoint, ctx: &mut C) -> Flow
    where
        C: Context,
        F: ModelFactory<C>,
    {
        match endpoint {
            Endpoint::Token(options) => self.token(ctx, options).await,
            Endpoint::Authorize(options) => self.authorize(ctx, options).await,
            Endpoint::Authenticate(options) => self.authenticate(ctx, options).await,
        }
    }

    fn finish(&self, endpoint: &'static str, error: Option<&OAuth2Error>) -> Flow {
        let flow = if error.is_some() {
            Flow::Halt
        } else {
            Flow::Continue
        };

        if let Some(metrics) = &self.metrics {
            metrics.record(endpoint, flow.into());
            if let Some(err) = error {
                metrics.record_error(endpoint, &err.error);
            }
        }

        flow
    }
}
