use serde::{Deserialize, Serialize};

/// A registered OAuth2 client as the model reports it to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    pub grants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_lifetime: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_lifetime: Option<u64>,
}

impl Client {
    pub fn new(
        id: String,
        secret: Option<String>,
        redirect_uris: Vec<String>,
        grants: Vec<String>,
    ) -> Self {
        Self {
            id,
            secret,
            redirect_uris,
            grants,
            access_token_lifetime: None,
            refresh_token_lifetime: None,
        }
    }

    pub fn supports_grant_type(&self, grant_type: &str) -> bool {
        self.grants.iter().any(|g| g == grant_type)
    }

    pub fn validate_redirect_uri(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|u| u == uri)
    }
}
