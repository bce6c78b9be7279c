use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An authorization code issued by the engine's authorization-code flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationCode {
    pub authorization_code: String,
    pub expires_at: DateTime<Utc>,
    pub redirect_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub client_id: String,
    pub user_id: String,
}

impl AuthorizationCode {
    pub fn new(
        authorization_code: String,
        client_id: String,
        user_id: String,
        redirect_uri: String,
        scope: Option<String>,
        lifetime_seconds: i64,
    ) -> Self {
        Self {
            authorization_code,
            expires_at: Utc::now() + Duration::seconds(lifetime_seconds),
            redirect_uri,
            scope,
            client_id,
            user_id,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
