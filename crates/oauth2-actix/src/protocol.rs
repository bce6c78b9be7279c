//! Conversions between actix-web's HTTP types and the neutral request/response values.

use actix_web::dev::{Payload, ServiceRequest};
use actix_web::http::header as actix_header;
use actix_web::{web, HttpResponse};
use std::collections::BTreeMap;
use url::form_urlencoded;

use oauth2_core::Response;

pub fn method_to_neutral(method: &actix_web::http::Method) -> http::Method {
    http::Method::from_bytes(method.as_str().as_bytes()).unwrap_or(http::Method::GET)
}

/// Copy request headers. Names/values that do not survive the conversion are skipped.
pub fn headers_to_neutral(headers: &actix_header::HeaderMap) -> http::HeaderMap {
    let mut out = http::HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let converted = (
            http::HeaderName::from_bytes(name.as_str().as_bytes()),
            http::HeaderValue::from_bytes(value.as_bytes()),
        );
        if let (Ok(name), Ok(value)) = converted {
            out.append(name, value);
        }
    }
    out
}

fn header_to_actix(
    name: &http::HeaderName,
    value: &http::HeaderValue,
) -> Option<(actix_header::HeaderName, actix_header::HeaderValue)> {
    let name = actix_header::HeaderName::from_bytes(name.as_str().as_bytes()).ok()?;
    let value = actix_header::HeaderValue::from_bytes(value.as_bytes()).ok()?;
    Some((name, value))
}

pub fn status_to_actix(status: http::StatusCode) -> actix_web::http::StatusCode {
    actix_web::http::StatusCode::from_u16(status.as_u16())
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
}

/// Decode a query string. On repeated keys the first value wins.
pub fn parse_query(query: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        map.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    map
}

/// Body encodings the adapter decodes into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Form,
    Json,
}

/// The decodable format declared by `content_type`, if any.
pub fn body_format(content_type: Option<&str>) -> Option<BodyFormat> {
    let mime = content_type?.split(';').next()?.trim().to_ascii_lowercase();
    match mime.as_str() {
        "application/x-www-form-urlencoded" => Some(BodyFormat::Form),
        "application/json" => Some(BodyFormat::Json),
        _ => None,
    }
}

/// Parse a urlencoded or JSON-object body into string fields.
///
/// Returns `None` for an empty body, any other content type, or a body that does not parse;
/// non-string JSON values are kept in their JSON text form.
pub fn parse_body(content_type: Option<&str>, bytes: &[u8]) -> Option<BTreeMap<String, String>> {
    if bytes.is_empty() {
        return None;
    }

    match body_format(content_type)? {
        BodyFormat::Form => {
            let mut map = BTreeMap::new();
            for (k, v) in form_urlencoded::parse(bytes) {
                map.entry(k.into_owned()).or_insert_with(|| v.into_owned());
            }
            Some(map)
        }
        BodyFormat::Json => {
            match serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(bytes) {
                Ok(object) => Some(
                    object
                        .into_iter()
                        .map(|(k, v)| match v {
                            serde_json::Value::String(s) => (k, s),
                            other => (k, other.to_string()),
                        })
                        .collect(),
                ),
                Err(err) => {
                    tracing::debug!(error = %err, "ignoring unparseable JSON body");
                    None
                }
            }
        }
    }
}

/// Buffer a form or JSON body and put an identical payload back for downstream services.
///
/// Other payloads are left untouched and yield `None`. A body that cannot be buffered (too large,
/// broken stream) is also `None`; downstream then sees an empty payload.
pub async fn read_body(req: &mut ServiceRequest) -> Option<web::Bytes> {
    let content_type = req
        .headers()
        .get(actix_header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    body_format(content_type)?;

    match req.extract::<web::Bytes>().await {
        Ok(bytes) => {
            req.set_payload(Payload::from(bytes.clone()));
            Some(bytes)
        }
        Err(err) => {
            tracing::debug!(error = %err, "request body not buffered; treating it as absent");
            None
        }
    }
}

/// Render a neutral response as an actix response.
pub fn to_http_response(response: &Response) -> HttpResponse {
    let mut builder = HttpResponse::build(status_to_actix(response.status));
    for (name, value) in response.headers.iter() {
        if let Some(header) = header_to_actix(name, value) {
            builder.append_header(header);
        }
    }

    match &response.body {
        Some(body) => builder.json(body),
        None => builder.finish(),
    }
}

/// Add `staged` headers the downstream response did not set itself.
pub fn merge_missing_headers(target: &mut actix_header::HeaderMap, staged: &http::HeaderMap) {
    let already_set: Vec<&http::HeaderName> = staged
        .keys()
        .filter(|name| target.contains_key(name.as_str()))
        .collect();

    for (name, value) in staged.iter() {
        if already_set.contains(&name) {
            continue;
        }
        if let Some((name, value)) = header_to_actix(name, value) {
            target.append(name, value);
        }
    }
}
