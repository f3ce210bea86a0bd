//! HTTP 传输：基于 reqwest 的 Transport 实现。
//!
//! HTTP transport backed by reqwest.

use super::{HttpMethod, PreparedRequest, RawResponse, Transport, TransportError};
use crate::client::config::ApiKey;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Proxy;
use std::time::Duration;
use tracing::warn;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Per-call correlation id header.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Settings needed to build an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub api_key: ApiKey,
    pub verify_ssl: bool,
    pub timeout: Duration,
    pub proxy_url: Option<String>,
    pub pool_max_idle_per_host: usize,
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let mut key = HeaderValue::from_str(config.api_key.expose()).map_err(|_| {
            Error::configuration_with_context(
                "API key contains characters not allowed in an HTTP header",
                ErrorContext::new()
                    .with_field_path("api_key")
                    .with_source("http_transport"),
            )
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if !config.verify_ssl {
            warn!(
                base_url = config.base_url.as_str(),
                "TLS certificate verification is disabled"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &PreparedRequest, request_id: &str) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut req = match request.method {
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Get => self.client.get(&url),
        };
        req = req.header(REQUEST_ID_HEADER, request_id);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::from_reqwest(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::from_reqwest(e)))?;

        Ok(RawResponse { status, body })
    }
}
