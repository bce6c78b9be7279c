use std::sync::Arc;
use tokio::sync::broadcast;

use crate::ErrorEvent;

#[derive(Debug, Clone)]
pub enum EventBusError {
    /// Nobody is listening.
    NoSubscribers,
}

impl std::fmt::Display for EventBusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventBusError::NoSubscribers => write!(f, "error bus has no subscribers"),
        }
    }
}

impl std::error::Error for EventBusError {}

/// The application-wide "error" emission capability.
///
/// Emission is synchronous and non-blocking so the error translator can call it without
/// suspending.
pub trait ErrorEmitter: Send + Sync {
    fn emit(&self, event: ErrorEvent) -> Result<(), EventBusError>;
}

pub type DynErrorEmitter = Arc<dyn ErrorEmitter>;

/// Cloneable handle for passing an emitter into app data / contexts.
#[derive(Clone)]
pub struct ErrorBusHandle {
    inner: DynErrorEmitter,
}

impl ErrorBusHandle {
    pub fn new(inner: DynErrorEmitter) -> Self {
        Self { inner }
    }

    pub fn emit(&self, event: ErrorEvent) -> Result<(), EventBusError> {
        self.inner.emit(event)
    }

    /// Emit, logging (not returning) any failure.
    pub fn emit_best_effort(&self, event: ErrorEvent) {
        let id = event.id.clone();
        if let Err(err) = self.inner.emit(event) {
            tracing::debug!(error = %err, event_id = %id, "error event not delivered (best-effort)");
        }
    }
}

/// In-process bus backed by a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastErrorBus {
    sender: broadcast::Sender<ErrorEvent>,
}

impl BroadcastErrorBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ErrorEvent> {
        self.sender.subscribe()
    }

    pub fn handle(&self) -> ErrorBusHandle {
        ErrorBusHandle::new(Arc::new(self.clone()))
    }
}

impl ErrorEmitter for BroadcastErrorBus {
    fn emit(&self, event: ErrorEvent) -> Result<(), EventBusError> {
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|_| EventBusError::NoSubscribers)
    }
}

/// Drain `receiver` into structured logs until the bus is dropped.
pub async fn forward_to_tracing(mut receiver: broadcast::Receiver<ErrorEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                tracing::error!(
                    event_id = %event.id,
                    error = %event.error,
                    error_description = %event.error_description,
                    status = event.status,
                    method = event.method.as_deref().unwrap_or(""),
                    path = event.path.as_deref().unwrap_or(""),
                    "oauth2 error"
                );
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "error log subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
