use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use oauth2_core::{OAuth2Error, OAuthState, RequestParts, OAUTH_STATE_KEY};

use crate::Context;

/// In-memory framework context that records every write.
#[derive(Debug, Clone)]
pub(crate) struct RecordingContext {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub query: BTreeMap<String, String>,
    pub body: Option<BTreeMap<String, String>>,

    pub status: Option<StatusCode>,
    pub body_written: Option<serde_json::Value>,
    pub response_headers: HeaderMap,
    pub state: HashMap<String, OAuthState>,
    pub events: RefCell<Vec<OAuth2Error>>,
}

impl RecordingContext {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            headers: HeaderMap::new(),
            query: BTreeMap::new(),
            body: None,
            status: None,
            body_written: None,
            response_headers: HeaderMap::new(),
            state: HashMap::new(),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn post_form(fields: &[(&str, &str)]) -> Self {
        Self {
            method: Method::POST,
            body: Some(
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            ..Self::get("/")
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: &'static str) -> Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    pub fn oauth(&self) -> Option<&OAuthState> {
        self.state.get(OAUTH_STATE_KEY)
    }
}

impl Context for RecordingContext {
    fn request_parts(&self) -> RequestParts<'_> {
        RequestParts {
            method: &self.method,
            headers: &self.headers,
            query: &self.query,
            body: self.body.as_ref(),
        }
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn set_body(&mut self, body: Option<serde_json::Value>) {
        self.body_written = body;
    }

    fn merge_headers(&mut self, headers: &HeaderMap) {
        oauth2_core::merge_headers(&mut self.response_headers, headers);
    }

    fn set_oauth_state(&mut self, state: OAuthState) {
        self.state.insert(OAUTH_STATE_KEY.to_string(), state);
    }

    fn emit_error(&self, error: &OAuth2Error) {
        self.events.borrow_mut().push(error.clone());
    }
}
