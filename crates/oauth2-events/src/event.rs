use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use oauth2_core::{ErrorKind, OAuth2Error};

/// One failed middleware call, as seen by centralized logging/monitoring.
///
/// Emitted for every translated error, including the silent (`unauthorized`) ones whose details
/// never reach the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub id: String,
    pub error: String,
    pub error_description: String,
    pub status: u16,
    pub kind: ErrorKind,

    /// Request method and path, when the emitting context knows them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    pub occurred_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl ErrorEvent {
    pub fn from_error(error: &OAuth2Error) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            error: error.error.clone(),
            error_description: error.error_description.clone(),
            status: error.code.as_u16(),
            kind: error.kind,
            method: None,
            path: None,
            occurred_at: Utc::now(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_request(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self.path = Some(path.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
