//! HTTP request collaborator.
//!
//! Services talk to the server only through [`Transport`], so the HTTP stack
//! ([`ApiClient`]) can be swapped for an in-memory double in tests.

pub mod http;

pub use http::ApiClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ConsoleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request: method, server-relative path, query pairs and optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Post, path).json(body)
    }

    pub fn put(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Put, path).json(body)
    }

    pub fn patch(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Patch, path).json(body)
    }

    pub fn json(mut self, body: &impl Serialize) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_query<K: Into<String>>(
        mut self,
        pairs: impl IntoIterator<Item = (K, String)>,
    ) -> Self {
        self.query.extend(pairs.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }
}

/// Performs one HTTP call and yields the unwrapped response payload.
///
/// Implementations issue exactly one request per call and never retry.
/// A `204` or empty body yields `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// Send and decode the payload into `T`
pub async fn send_as<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<T> {
    let label = format!("{} {}", request.method, request.path);
    let data = transport.send(request).await?;
    serde_json::from_value(data)
        .map_err(|e| ConsoleError::invalid_response(format!("{}: {}", label, e)))
}

/// Send and discard the payload
pub async fn send_unit(transport: &dyn Transport, request: ApiRequest) -> Result<()> {
    transport.send(request).await.map(|_| ())
}

/// Unwrap the `{ "success": true, "data": ... }` envelope of a response.
///
/// Non-success statuses, and success statuses carrying `"success": false`,
/// become a [`ConsoleError`]. Bodies without an envelope pass through as-is.
pub fn unwrap_envelope(status: u16, body: Value) -> Result<Value> {
    if !(200..300).contains(&status) {
        return Err(ConsoleError::from_response(status, &body));
    }

    match body.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(body.get("data").cloned().unwrap_or(Value::Null)),
        // a 200 that still reports failure is treated as a server-side rejection
        Some(false) => Err(ConsoleError::from_response(400, &body)),
        None => Ok(body),
    }
}
