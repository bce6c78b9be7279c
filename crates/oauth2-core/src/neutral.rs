//! Protocol-neutral request/response values exchanged with the authorization engine.

use http::header::{AsHeaderName, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use std::collections::BTreeMap;

/// Borrowed view of the framework request, as exposed by a framework context.
#[derive(Debug, Clone, Copy)]
pub struct RequestParts<'a> {
    pub method: &'a Method,
    pub headers: &'a HeaderMap,
    pub query: &'a BTreeMap<String, String>,
    /// `None` when the framework request carried no (parseable) body.
    pub body: Option<&'a BTreeMap<String, String>>,
}

/// Neutral request handed to the engine. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub headers: HeaderMap,
    pub query: BTreeMap<String, String>,
    pub body: BTreeMap<String, String>,
}

impl Request {
    pub fn new(
        method: Method,
        headers: HeaderMap,
        query: BTreeMap<String, String>,
        body: BTreeMap<String, String>,
    ) -> Self {
        Self {
            method,
            headers,
            query,
            body,
        }
    }

    /// Copy a framework request view. Absent parts become empty.
    pub fn from_parts(parts: RequestParts<'_>) -> Self {
        Self {
            method: parts.method.clone(),
            headers: parts.headers.clone(),
            query: parts.query.clone(),
            body: parts.body.cloned().unwrap_or_default(),
        }
    }

    pub fn header(&self, name: impl AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn body_param(&self, key: &str) -> Option<&str> {
        self.body.get(key).map(String::as_str)
    }

    pub fn authorization(&self) -> Option<&str> {
        self.header(AUTHORIZATION)
    }

    /// Whether the declared content type matches `mime` (parameters ignored).
    pub fn is(&self, mime: &str) -> bool {
        self.header(CONTENT_TYPE)
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().eq_ignore_ascii_case(mime))
            .unwrap_or(false)
    }
}

/// Neutral response the engine writes into.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn set_body(&mut self, body: serde_json::Value) {
        self.body = Some(body);
    }

    /// Redirect to `location` with `302 Found`.
    pub fn redirect(&mut self, location: HeaderValue) {
        self.status = StatusCode::FOUND;
        self.headers.insert(http::header::LOCATION, location);
    }
}

/// Merge `source` onto `target`: every header name present in `source` replaces all values
/// previously stored under that name in `target`.
pub fn merge_headers(target: &mut HeaderMap, source: &HeaderMap) {
    for name in source.keys() {
        target.remove(name);
    }
    for (name, value) in source.iter() {
        target.append(name.clone(), value.clone());
    }
}
