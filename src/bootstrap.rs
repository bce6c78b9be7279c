//! Host-side wiring: configuration, logging, the error bus and metrics.

use actix_web::web;
use std::sync::Arc;

use oauth2_adapter::OAuth2;
use oauth2_config::Config;
use oauth2_core::OAuth2Error;
use oauth2_events::{forward_to_tracing, BroadcastErrorBus, ErrorBusHandle};
use oauth2_observability::{init_telemetry, Metrics};
use oauth2_ports::AuthorizationEngine;

/// Shared services a host application registers once and hands to every adapter it builds.
pub struct Runtime {
    pub config: Config,
    pub metrics: Metrics,
    errors: Option<BroadcastErrorBus>,
}

impl Runtime {
    /// Validate `config`, install the log subscriber and create metrics and the error bus.
    ///
    /// An already installed subscriber is kept (tests, embedding applications).
    pub fn init(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        config.validate()?;

        if let Err(e) = init_telemetry(&config.telemetry.log_filter, config.telemetry.json) {
            tracing::debug!("Keeping existing tracing subscriber: {}", e);
        }

        let metrics = Metrics::new()?;
        let errors = config
            .events
            .enabled
            .then(|| BroadcastErrorBus::new(config.events.capacity));

        tracing::info!(
            service = %config.telemetry.service_name,
            error_events = errors.is_some(),
            "oauth2 middleware runtime initialized"
        );

        Ok(Self {
            config,
            metrics,
            errors,
        })
    }

    /// [`Runtime::init`] with [`Config::load`].
    pub fn from_environment() -> Result<Self, Box<dyn std::error::Error>> {
        Self::init(Config::load())
    }

    /// The error bus, when error events are enabled.
    pub fn error_bus(&self) -> Option<&BroadcastErrorBus> {
        self.errors.as_ref()
    }

    /// App data to register with `App::app_data` so the middleware can emit error events.
    pub fn error_bus_data(&self) -> Option<web::Data<ErrorBusHandle>> {
        self.errors.as_ref().map(|bus| web::Data::new(bus.handle()))
    }

    /// Log every error event. Must be called from within an actix/tokio runtime.
    pub fn spawn_error_logger(&self) -> Option<actix_rt::task::JoinHandle<()>> {
        self.errors
            .as_ref()
            .map(|bus| actix_rt::spawn(forward_to_tracing(bus.subscribe())))
    }

    /// An adapter using the configured engine settings and the shared metrics.
    pub fn adapter<E, F>(&self, model: F) -> Result<Arc<OAuth2<E, F>>, OAuth2Error>
    where
        E: AuthorizationEngine,
    {
        OAuth2::builder()
            .settings(self.config.engine.clone())
            .model(model)
            .metrics(self.metrics.clone())
            .build()
            .map(Arc::new)
    }
}
