//! 客户端配置：默认值、YAML 文件与 SERPPRO_* 环境变量。
//!
//! Client configuration: defaults, YAML files and `SERPPRO_*` environment variables.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://moab-apis.ru";
/// The service may take minutes to assemble Wordstat data.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 32;

pub const ENV_API_KEY: &str = "SERPPRO_API_KEY";
pub const ENV_BASE_URL: &str = "SERPPRO_BASE_URL";
pub const ENV_VERIFY_SSL: &str = "SERPPRO_VERIFY_SSL";
pub const ENV_TIMEOUT_SECS: &str = "SERPPRO_HTTP_TIMEOUT_SECS";
pub const ENV_PROXY_URL: &str = "SERPPRO_PROXY_URL";
pub const ENV_POOL_MAX_IDLE: &str = "SERPPRO_HTTP_POOL_MAX_IDLE_PER_HOST";

/// API credential. Never printed: `Debug` and `Display` are redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for the transport only.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl<'de> Deserialize<'de> for ApiKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(ApiKey)
    }
}

/// Settings for a [`SerpProClient`](crate::SerpProClient).
///
/// ```yaml
/// api_key: "..."
/// base_url: "https://moab-apis.ru"
/// verify_ssl: true
/// timeout_secs: 300
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: Option<ApiKey>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_verify_ssl() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_pool_max_idle() -> usize {
    DEFAULT_POOL_MAX_IDLE_PER_HOST
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            verify_ssl: default_verify_ssl(),
            timeout_secs: default_timeout_secs(),
            proxy_url: None,
            pool_max_idle_per_host: default_pool_max_idle(),
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid client configuration: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read {}: {}", path.display(), e),
                ErrorContext::new().with_source("config_loader"),
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Defaults overlaid with the `SERPPRO_*` environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup` (an environment-like source) onto `self`.
    ///
    /// Unparseable numbers and booleans are configuration errors rather than
    /// silently ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(ApiKey::new(key.trim()));
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = get(ENV_VERIFY_SSL) {
            self.verify_ssl = parse_bool(ENV_VERIFY_SSL, &raw)?;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(url) = get(ENV_PROXY_URL) {
            self.proxy_url = Some(url.trim().to_string());
        }
        if let Some(raw) = get(ENV_POOL_MAX_IDLE) {
            self.pool_max_idle_per_host = parse_number(ENV_POOL_MAX_IDLE, &raw)?;
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration_with_context(
            format!("expected a boolean, got '{}'", other),
            ErrorContext::new().with_field_path(name),
        )),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        Error::configuration_with_context(
            format!("expected a non-negative integer, got '{}'", raw.trim()),
            ErrorContext::new().with_field_path(name),
        )
    })
}
