use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::{unwrap_envelope, ApiRequest, Method, Transport};
use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};

/// `reqwest`-backed [`Transport`] against one admin API server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url.trim())?;
        // join() replaces the last segment unless the base path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConsoleError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            log_requests: false,
        })
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        let mut client = Self::new(
            &config.api.base_url,
            config.api.token.clone(),
            Duration::from_secs(config.api.request_timeout_secs),
        )?;
        client.log_requests = config.api.enable_request_logging;
        Ok(client)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn logs_requests(&self) -> bool {
        self.log_requests
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request.path)?;
        if self.log_requests {
            tracing::debug!(method = %request.method, url = %url, "api request");
        }

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(error = %e, path = %request.path, "api request not delivered");
            ConsoleError::from(e)
        })?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // non-JSON error pages still carry a usable status
                Err(_) if !(200..300).contains(&status) => Value::String(text),
                Err(e) => return Err(ConsoleError::invalid_response(e.to_string())),
            }
        };

        let result = unwrap_envelope(status, body);
        if self.log_requests {
            if let Err(e) = &result {
                tracing::debug!(status, error = %e, path = %request.path, "api request failed");
            }
        }
        result
    }
}
