use hocon::HoconLoader;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Settings handed to the authorization engine together with the model.
///
/// Lifetimes are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    pub access_token_lifetime: u64,
    pub refresh_token_lifetime: u64,
    pub authorization_code_lifetime: u64,
    pub allow_bearer_tokens_in_query_string: bool,
    pub allow_empty_state: bool,
    pub allow_extended_token_attributes: bool,
    pub always_issue_new_refresh_token: bool,
    /// Per grant type; grants not listed require client authentication.
    pub require_client_authentication: HashMap<String, bool>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            access_token_lifetime: 60 * 60,
            refresh_token_lifetime: 60 * 60 * 24 * 14,
            authorization_code_lifetime: 5 * 60,
            allow_bearer_tokens_in_query_string: false,
            allow_empty_state: false,
            allow_extended_token_attributes: false,
            always_issue_new_refresh_token: true,
            require_client_authentication: HashMap::new(),
        }
    }
}

impl EngineSettings {
    pub fn requires_client_authentication(&self, grant_type: &str) -> bool {
        self.require_client_authentication
            .get(grant_type)
            .copied()
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub service_name: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "oauth2-middleware".to_string(),
            log_filter: "info".to_string(),
            json: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EventsConfig {
    pub enabled: bool,
    /// Broadcast buffer size of the error bus.
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    pub telemetry: TelemetryConfig,
    pub events: EventsConfig,
}

impl Config {
    /// Load `application.conf` from the working directory, falling back to the environment.
    pub fn load() -> Self {
        Self::from_hocon_path("application.conf").unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load HOCON config: {}. Falling back to environment variables.",
                e
            );
            Self::from_env().unwrap_or_else(|e| {
                tracing::warn!("Failed to read environment config: {}. Using defaults.", e);
                Self::default()
            })
        })
    }

    /// Load configuration from a specific HOCON file path
    pub fn from_hocon_path<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        HoconLoader::new()
            .load_file(path)
            .map_err(|e| format!("Failed to load HOCON file: {}", e))?
            .resolve()
            .map_err(|e| format!("Failed to parse and resolve HOCON: {}", e))
    }

    /// Parse configuration from an in-memory HOCON document.
    pub fn from_hocon_str(document: &str) -> Result<Self, String> {
        HoconLoader::new()
            .load_str(document)
            .map_err(|e| format!("Failed to load HOCON document: {}", e))?
            .resolve()
            .map_err(|e| format!("Failed to parse and resolve HOCON: {}", e))
    }

    /// Read `OAUTH2__<SECTION>__<KEY>` variables, e.g. `OAUTH2__ENGINE__ACCESS_TOKEN_LIFETIME`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("OAUTH2")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        let engine = &self.engine;
        for (name, value) in [
            ("access_token_lifetime", engine.access_token_lifetime),
            ("refresh_token_lifetime", engine.refresh_token_lifetime),
            (
                "authorization_code_lifetime",
                engine.authorization_code_lifetime,
            ),
        ] {
            if value == 0 {
                return Err(format!("engine.{} must be greater than zero", name));
            }
        }

        if self.events.enabled && self.events.capacity == 0 {
            return Err("events.capacity must be greater than zero".to_string());
        }

        Ok(())
    }
}
