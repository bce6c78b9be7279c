use serde::{Deserialize, Serialize};

/// The resource owner resolved by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Model-specific attributes the engine passes through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub fn new(id: String, username: String) -> Self {
        Self {
            id,
            username,
            attributes: serde_json::Map::new(),
        }
    }
}
