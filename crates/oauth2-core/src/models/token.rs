use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An issued (or validated) access token as returned by the authorization engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Token {
    pub fn new(
        access_token: String,
        client_id: String,
        user_id: Option<String>,
        scope: Option<String>,
        lifetime_seconds: i64,
    ) -> Self {
        Self {
            access_token,
            access_token_expires_at: Some(Utc::now() + Duration::seconds(lifetime_seconds)),
            refresh_token: None,
            refresh_token_expires_at: None,
            scope,
            client_id,
            user_id,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: String, lifetime_seconds: i64) -> Self {
        self.refresh_token = Some(refresh_token);
        self.refresh_token_expires_at = Some(Utc::now() + Duration::seconds(lifetime_seconds));
        self
    }

    pub fn is_expired(&self) -> bool {
        self.access_token_expires_at
            .map(|at| at <= Utc::now())
            .unwrap_or(false)
    }

    /// Seconds until the access token expires, clamped at zero.
    pub fn expires_in(&self) -> Option<i64> {
        self.access_token_expires_at
            .map(|at| (at - Utc::now()).num_seconds().max(0))
    }
}

/// RFC 6749 §5.1 token endpoint body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl From<&Token> for TokenResponse {
    fn from(token: &Token) -> Self {
        Self {
            access_token: token.access_token.clone(),
            token_type: "Bearer".to_string(),
            expires_in: token.expires_in(),
            refresh_token: token.refresh_token.clone(),
            scope: token.scope.clone(),
        }
    }
}
