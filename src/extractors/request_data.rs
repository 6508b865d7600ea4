//! Flatten request parameters into one `field -> string` map, whatever the transport.
//!
//! Sources are merged in order query string, form body, JSON body; a later
//! source overrides an earlier one, so the JSON body wins. Nothing is validated here.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestData(BTreeMap<String, String>);

impl RequestData {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn merge_json(&mut self, body: &[u8]) -> Result<(), AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => {
                for (k, v) in map {
                    self.0.insert(k, json_to_param(v));
                }
                Ok(())
            }
            _ => Err(AppError::BadRequest("Request body must be a JSON object".into())),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RequestData(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn json_to_param(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub const BODY_TOO_LARGE: &str = "Request body is too large";

/// Body rejections become JSON errors; the length cap keeps its 413.
fn body_error(status: StatusCode, fallback: &str) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(BODY_TOO_LARGE.into())
    } else {
        AppError::BadRequest(fallback.into())
    }
}

enum BodyKind {
    Json,
    Form,
    Ignored,
}

impl BodyKind {
    fn of(req: &Request) -> Self {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();
        let mime = content_type.split(';').next().unwrap_or("").trim();
        if mime == "application/json" || mime.ends_with("+json") {
            BodyKind::Json
        } else if mime == "application/x-www-form-urlencoded"
            && req.method() != Method::GET
            && req.method() != Method::HEAD
        {
            BodyKind::Form
        } else {
            BodyKind::Ignored
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestData
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut data = RequestData::default();
        let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map_err(|_| AppError::BadRequest("Malformed query string".into()).into_response())?;
        data.0.extend(query);

        match BodyKind::of(&req) {
            BodyKind::Form => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| body_error(e.status(), "Malformed form body").into_response())?;
                data.0.extend(pairs);
            }
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| body_error(e.status(), "Malformed request body").into_response())?;
                data.merge_json(&bytes).map_err(IntoResponse::into_response)?;
            }
            BodyKind::Ignored => {}
        }
        Ok(data)
    }
}
