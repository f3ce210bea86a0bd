//! 传输层：Transport trait 与已准备好的请求/原始响应类型。
//!
//! Transport layer: one validated request in, one raw response out.
//!
//! [`HttpTransport`] is the production implementation. Anything implementing
//! [`Transport`] can be injected through
//! [`SerpProClientBuilder::transport`](crate::SerpProClientBuilder::transport),
//! which is how tests observe (or forbid) network calls.

mod http;

pub use http::{HttpTransport, TransportConfig};

use crate::types::Operation;
use crate::Result;
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that passed validation and is ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub operation: Operation,
    pub method: HttpMethod,
    /// Path relative to the base URL, starting with `/`.
    pub path: &'static str,
    /// Query string pairs (GET endpoints).
    pub query: Vec<(String, String)>,
    /// JSON body (POST endpoints).
    pub body: Option<serde_json::Value>,
}

impl PreparedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed exchange, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs exactly one network exchange per call.
///
/// Implementations must not retry, cache or share per-call state; the client
/// may invoke `send` from many tasks at once.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &PreparedRequest, request_id: &str) -> Result<RawResponse>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Sort a reqwest failure into timeout / connect / other HTTP errors.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Http(e)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}
