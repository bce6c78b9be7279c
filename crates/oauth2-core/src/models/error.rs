use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an error is surfaced to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bearer challenge failures: status and headers only, never a body.
    Unauthorized,
    /// Everything else: `{ error, error_description }` JSON body.
    Reported,
}

/// An error raised by the authorization engine, the model, or the adapter itself.
#[derive(Debug, Clone)]
pub struct OAuth2Error {
    pub kind: ErrorKind,
    pub error: String,
    pub error_description: String,
    pub code: StatusCode,
    pub headers: HeaderMap,
}

/// Wire shape of a reported error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub error_description: String,
}

impl OAuth2Error {
    pub fn new(error: &str, description: &str, code: StatusCode) -> Self {
        Self {
            kind: ErrorKind::Reported,
            error: error.to_string(),
            error_description: description.to_string(),
            code,
            headers: HeaderMap::new(),
        }
    }

    /// Adapter or model misconfiguration (missing model, missing model capability).
    pub fn invalid_argument(description: &str) -> Self {
        Self::new(
            "invalid_argument",
            description,
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }

    pub fn invalid_request(description: &str) -> Self {
        Self::new("invalid_request", description, StatusCode::BAD_REQUEST)
    }

    pub fn invalid_client(description: &str) -> Self {
        Self::new("invalid_client", description, StatusCode::BAD_REQUEST)
    }

    pub fn invalid_grant(description: &str) -> Self {
        Self::new("invalid_grant", description, StatusCode::BAD_REQUEST)
    }

    pub fn invalid_scope(description: &str) -> Self {
        Self::new("invalid_scope", description, StatusCode::BAD_REQUEST)
    }

    pub fn invalid_token(description: &str) -> Self {
        Self::new("invalid_token", description, StatusCode::UNAUTHORIZED)
    }

    pub fn insufficient_scope(description: &str) -> Self {
        Self::new("insufficient_scope", description, StatusCode::FORBIDDEN)
    }

    pub fn unauthorized_client(description: &str) -> Self {
        Self::new("unauthorized_client", description, StatusCode::BAD_REQUEST)
    }

    pub fn unsupported_grant_type(description: &str) -> Self {
        Self::new("unsupported_grant_type", description, StatusCode::BAD_REQUEST)
    }

    pub fn unsupported_response_type(description: &str) -> Self {
        Self::new(
            "unsupported_response_type",
            description,
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn access_denied(description: &str) -> Self {
        Self::new("access_denied", description, StatusCode::BAD_REQUEST)
    }

    pub fn server_error(description: &str) -> Self {
        Self::new("server_error", description, StatusCode::SERVICE_UNAVAILABLE)
    }

    /// A request carrying no (usable) bearer credentials.
    ///
    /// Unlike every other constructor this one is [`ErrorKind::Unauthorized`]: the translator
    /// answers with the status code and challenge headers only.
    pub fn unauthorized_request(description: &str) -> Self {
        Self {
            kind: ErrorKind::Unauthorized,
            ..Self::new("unauthorized_request", description, StatusCode::UNAUTHORIZED)
        }
    }

    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.error.clone(),
            error_description: self.error_description.clone(),
        }
    }
}

impl fmt::Display for OAuth2Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.error_description)
    }
}

impl std::error::Error for OAuth2Error {}

impl From<serde_json::Error> for OAuth2Error {
    fn from(err: serde_json::Error) -> Self {
        Self::server_error(&err.to_string())
    }
}
