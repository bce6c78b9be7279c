#![allow(dead_code)]

use async_trait::async_trait;
use http::header::{CACHE_CONTROL, PRAGMA, WWW_AUTHENTICATE};
use http::{HeaderValue, Method};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rust_oauth2_middleware::{
    ActixContext, AuthenticateOptions, AuthorizationCode, AuthorizationEngine, AuthorizeOptions,
    Client, DynModel, EngineOptions, EngineSettings, Model, ModelFactory, OAuth2Error, Request,
    Response, Token, TokenOptions, TokenResponse, User,
};

/// Model over in-memory maps. Passwords are compared in plain text.
#[derive(Default)]
pub struct InMemoryModel {
    clients: Mutex<HashMap<String, Client>>,
    users: Mutex<HashMap<String, (String, User)>>,
    tokens: Mutex<HashMap<String, Token>>,
    codes: Mutex<HashMap<String, AuthorizationCode>>,
    /// Usernames whose lookup fails with `server_error`.
    broken_users: Mutex<Vec<String>>,
}

impl InMemoryModel {
    pub fn with_fixtures() -> Self {
        let model = Self::default();
        model.add_client(Client::new(
            "client_a".to_string(),
            Some("secret_a".to_string()),
            vec!["https://client.example/cb".to_string()],
            vec![
                "client_credentials".to_string(),
                "password".to_string(),
                "authorization_code".to_string(),
            ],
        ));
        model.add_user("alice", "wonderland", User::new("user_1".into(), "alice".into()));
        model
    }

    pub fn add_client(&self, client: Client) {
        self.clients
            .lock()
            .unwrap()
            .insert(client.id.clone(), client);
    }

    pub fn add_user(&self, username: &str, password: &str, user: User) {
        self.users
            .lock()
            .unwrap()
            .insert(username.to_string(), (password.to_string(), user));
    }

    pub fn break_user(&self, username: &str) {
        self.broken_users.lock().unwrap().push(username.to_string());
    }

    pub fn add_token(&self, token: Token) {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.access_token.clone(), token);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn code_count(&self) -> usize {
        self.codes.lock().unwrap().len()
    }
}

#[async_trait]
impl Model for InMemoryModel {
    async fn get_user(&self, username: &str, password: &str) -> Result<Option<User>, OAuth2Error> {
        if self.broken_users.lock().unwrap().iter().any(|u| u == username) {
            return Err(OAuth2Error::server_error("Server error: user store unavailable"));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(username)
            .filter(|(stored, _)| stored == password)
            .map(|(_, user)| user.clone()))
    }

    async fn get_client(
        &self,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> Result<Option<Client>, OAuth2Error> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .get(client_id)
            .filter(|c| client_secret.is_none() || c.secret.as_deref() == client_secret)
            .cloned())
    }

    async fn save_token(
        &self,
        token: &Token,
        _client: &Client,
        _user: Option<&User>,
    ) -> Result<Token, OAuth2Error> {
        self.add_token(token.clone());
        Ok(token.clone())
    }

    async fn get_access_token(&self, access_token: &str) -> Result<Option<Token>, OAuth2Error> {
        Ok(self.tokens.lock().unwrap().get(access_token).cloned())
    }

    async fn save_authorization_code(
        &self,
        code: &AuthorizationCode,
        _client: &Client,
        _user: &User,
    ) -> Result<AuthorizationCode, OAuth2Error> {
        self.codes
            .lock()
            .unwrap()
            .insert(code.authorization_code.clone(), code.clone());
        Ok(code.clone())
    }
}

/// Small engine covering `client_credentials`/`password` token issuance, code issuance and
/// bearer verification against [`Model`].
pub struct ReferenceEngine {
    settings: EngineSettings,
    model: DynModel,
}

fn new_secret() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl ReferenceEngine {
    async fn client(&self, request: &Request, secret_required: bool) -> Result<Client, OAuth2Error> {
        let id = request
            .body_param("client_id")
            .or_else(|| request.query_param("client_id"))
            .ok_or_else(|| OAuth2Error::invalid_request("Missing parameter: `client_id`"))?;
        let secret = request.body_param("client_secret");
        if secret_required && secret.is_none() {
            return Err(OAuth2Error::invalid_client(
                "Invalid client: cannot retrieve client credentials",
            ));
        }

        self.model
            .get_client(id, secret)
            .await?
            .ok_or_else(|| OAuth2Error::invalid_client("Invalid client: client is invalid"))
    }
}

#[async_trait]
impl AuthorizationEngine for ReferenceEngine {
    fn from_options(options: EngineOptions) -> Result<Self, OAuth2Error> {
        Ok(Self {
            settings: options.settings,
            model: options.model,
        })
    }

    fn model(&self) -> &DynModel {
        &self.model
    }

    async fn token(
        &self,
        request: &Request,
        response: &mut Response,
        options: &TokenOptions,
    ) -> Result<Token, OAuth2Error> {
        response.set_header(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response.set_header(PRAGMA, HeaderValue::from_static("no-cache"));

        if request.method != Method::POST {
            return Err(OAuth2Error::invalid_request(
                "Invalid request: method must be POST",
            ));
        }
        if !request.is("application/x-www-form-urlencoded") {
            return Err(OAuth2Error::invalid_request(
                "Invalid request: content must be application/x-www-form-urlencoded",
            ));
        }
        let grant_type = request
            .body_param("grant_type")
            .ok_or_else(|| OAuth2Error::invalid_request("Missing parameter: `grant_type`"))?;

        let secret_required = options
            .require_client_authentication
            .get(grant_type)
            .copied()
            .unwrap_or_else(|| self.settings.requires_client_authentication(grant_type));
        let client = self.client(request, secret_required).await?;
        if !client.supports_grant_type(grant_type) {
            return Err(OAuth2Error::unauthorized_client(
                "Unauthorized client: `grant_type` is invalid",
            ));
        }

        let user = match grant_type {
            "client_credentials" => None,
            "password" => {
                let username = request
                    .body_param("username")
                    .ok_or_else(|| OAuth2Error::invalid_request("Missing parameter: `username`"))?;
                let password = request
                    .body_param("password")
                    .ok_or_else(|| OAuth2Error::invalid_request("Missing parameter: `password`"))?;
                let user = self.model.get_user(username, password).await?.ok_or_else(|| {
                    OAuth2Error::invalid_grant("Invalid grant: user credentials are invalid")
                })?;
                Some(user)
            }
            _ => {
                return Err(OAuth2Error::unsupported_grant_type(
                    "Unsupported grant type: `grant_type` is invalid",
                ))
            }
        };

        let lifetime = options
            .access_token_lifetime
            .unwrap_or(self.settings.access_token_lifetime);
        let mut token = Token::new(
            new_secret(),
            client.id.clone(),
            user.as_ref().map(|u| u.id.clone()),
            request.body_param("scope").map(str::to_string),
            lifetime as i64,
        );
        if user.is_some() {
            token = token.with_refresh_token(
                new_secret(),
                options
                    .refresh_token_lifetime
                    .unwrap_or(self.settings.refresh_token_lifetime) as i64,
            );
        }

        let token = self.model.save_token(&token, &client, user.as_ref()).await?;
        response.set_body(serde_json::to_value(TokenResponse::from(&token))?);
        Ok(token)
    }

    async fn authorize(
        &self,
        request: &Request,
        response: &mut Response,
        options: &AuthorizeOptions,
    ) -> Result<AuthorizationCode, OAuth2Error> {
        let client = self.client(request, false).await?;
        if !client.supports_grant_type("authorization_code") {
            return Err(OAuth2Error::unauthorized_client(
                "Unauthorized client: `grant_type` is invalid",
            ));
        }

        let param = |key: &str| request.query_param(key).or_else(|| request.body_param(key));
        let redirect_uri = param("redirect_uri")
            .ok_or_else(|| OAuth2Error::invalid_request("Missing parameter: `redirect_uri`"))?;
        if !client.validate_redirect_uri(redirect_uri) {
            return Err(OAuth2Error::invalid_client(
                "Invalid client: `redirect_uri` does not match client value",
            ));
        }
        if param("response_type") != Some("code") {
            return Err(OAuth2Error::unsupported_response_type(
                "Unsupported response type: `response_type` is not supported",
            ));
        }
        let state = param("state");
        let allow_empty_state = options
            .allow_empty_state
            .unwrap_or(self.settings.allow_empty_state);
        if state.is_none() && !allow_empty_state {
            return Err(OAuth2Error::invalid_request("Missing parameter: `state`"));
        }

        let handler = options
            .authenticate_handler
            .as_ref()
            .ok_or_else(|| OAuth2Error::server_error("Server error: no authenticate handler"))?;
        let user = handler.handle(request, response).await?;

        let code = AuthorizationCode::new(
            new_secret(),
            client.id.clone(),
            user.id.clone(),
            redirect_uri.to_string(),
            param("scope").map(str::to_string),
            options
                .authorization_code_lifetime
                .unwrap_or(self.settings.authorization_code_lifetime) as i64,
        );
        let code = self
            .model
            .save_authorization_code(&code, &client, &user)
            .await?;

        let mut location = format!("{}?code={}", redirect_uri, code.authorization_code);
        if let Some(state) = state {
            location.push_str("&state=");
            location.push_str(state);
        }
        let location = HeaderValue::from_str(&location)
            .map_err(|_| OAuth2Error::invalid_request("Invalid parameter: `state`"))?;
        response.redirect(location);

        Ok(code)
    }

    async fn authenticate(
        &self,
        request: &Request,
        response: &mut Response,
        options: &AuthenticateOptions,
    ) -> Result<Token, OAuth2Error> {
        response.set_header(
            WWW_AUTHENTICATE,
            HeaderValue::from_static("Bearer realm=\"Service\""),
        );

        let from_header = match request.authorization() {
            Some(value) => Some(value.strip_prefix("Bearer ").ok_or_else(|| {
                OAuth2Error::unauthorized_request(
                    "Unauthorized request: malformed authorization header",
                )
            })?),
            None => None,
        };
        let allow_query = options
            .allow_bearer_tokens_in_query_string
            .unwrap_or(self.settings.allow_bearer_tokens_in_query_string);
        let from_query = request
            .query_param("access_token")
            .filter(|_| allow_query);

        let access_token = from_header.or(from_query).ok_or_else(|| {
            OAuth2Error::unauthorized_request("Unauthorized request: no authentication given")
        })?;

        let token = self
            .model
            .get_access_token(access_token)
            .await?
            .filter(|t| !t.is_expired())
            .ok_or_else(|| OAuth2Error::invalid_token("Invalid token: access token is invalid"))?;

        if let Some(scope) = &options.scope {
            if !self.model.verify_scope(&token, scope).await? {
                return Err(OAuth2Error::insufficient_scope(
                    "Insufficient scope: authorized scope is insufficient",
                ));
            }
        }

        Ok(token)
    }
}

/// Factory handing out one shared model and counting how often it was asked.
#[derive(Clone)]
pub struct SharedModelFactory {
    pub model: Arc<InMemoryModel>,
    pub created: Arc<AtomicUsize>,
}

impl SharedModelFactory {
    pub fn new(model: InMemoryModel) -> Self {
        Self {
            model: Arc::new(model),
            created: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ModelFactory<ActixContext> for SharedModelFactory {
    fn create(&self, _ctx: &ActixContext) -> Result<DynModel, OAuth2Error> {
        self.created.fetch_add(1, Ordering::SeqCst);
        let model: DynModel = self.model.clone();
        Ok(model)
    }
}
