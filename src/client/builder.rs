//! 客户端构建器：汇总配置并校验 API 密钥与基础 URL。
//!
//! Client builder: gathers configuration and checks the key and base URL.

use super::config::{ApiKey, ClientConfig};
use super::core::SerpProClient;
use crate::transport::{HttpTransport, Transport, TransportConfig};
use crate::{Error, ErrorContext, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`SerpProClient`].
///
/// Starts from [`ClientConfig::default`]; [`from_env`](Self::from_env) and
/// [`from_config`](Self::from_config) seed it from other sources. Explicit
/// setters win over whatever was seeded.
pub struct SerpProClientBuilder {
    config: ClientConfig,
    /// Sub-second precision the whole-second config value cannot hold.
    timeout: Option<Duration>,
    /// Replaces the HTTP transport (tests, custom stacks).
    transport: Option<Arc<dyn Transport>>,
}

impl SerpProClientBuilder {
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            timeout: None,
            transport: None,
        }
    }

    /// Seed from defaults overlaid with `SERPPRO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    /// Seed from a YAML file, then overlay the environment.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = ClientConfig::from_yaml_file(path)?
            .with_overrides(|name| std::env::var(name).ok())?;
        Ok(Self::from_config(config))
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(ApiKey::new(key));
        self
    }

    /// Override the base URL (mock servers, staging).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Disabling verification accepts any server certificate. Logged at warn.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.config.verify_ssl = verify;
        self
    }

    /// Per-request timeout, kept at full precision. Zero is rejected by `build`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(url.into());
        self
    }

    pub fn pool_max_idle_per_host(mut self, n: usize) -> Self {
        self.config.pool_max_idle_per_host = n;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<SerpProClient> {
        let api_key = match self.config.api_key {
            Some(ref key) if !key.is_blank() => key.clone(),
            _ => {
                return Err(Error::configuration_with_context(
                    "API key is required",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_details(format!(
                            "pass it to the builder or set {}",
                            super::config::ENV_API_KEY
                        )),
                ))
            }
        };

        let base_url = check_base_url(&self.config.base_url)?;

        let timeout = self.timeout.unwrap_or_else(|| self.config.timeout());
        if timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "timeout must be greater than zero",
                ErrorContext::new().with_field_path("timeout"),
            ));
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(&TransportConfig {
                base_url: base_url.clone(),
                api_key,
                verify_ssl: self.config.verify_ssl,
                timeout,
                proxy_url: self.config.proxy_url.clone(),
                pool_max_idle_per_host: self.config.pool_max_idle_per_host,
            })?),
        };

        Ok(SerpProClient {
            transport,
            base_url,
            timeout,
            verify_ssl: self.config.verify_ssl,
        })
    }
}

impl Default for SerpProClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |details: String| {
        Error::configuration_with_context(
            "base URL must be an absolute http(s) URL",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(details),
        )
    };
    let url = url::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(trimmed.to_string()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_missing_key() {
        let err = SerpProClientBuilder::new().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("api_key")
        );
    }

    #[test]
    fn test_base_url_checked_and_trimmed() {
        let client = SerpProClientBuilder::new()
            .api_key("k")
            .base_url("http://127.0.0.1:9000/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");

        let err = SerpProClientBuilder::new()
            .api_key("k")
            .base_url("ftp://example.org")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        assert!(SerpProClientBuilder::new()
            .api_key("k")
            .base_url("not a url")
            .build()
            .is_err());
    }

    #[test]
    fn test_timeout_keeps_sub_second_precision() {
        let client = SerpProClientBuilder::new()
            .api_key("k")
            .timeout(Duration::from_millis(1500))
            .build()
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(1500));

        let client = SerpProClientBuilder::new().api_key("k").build().unwrap();
        assert_eq!(
            client.timeout(),
            Duration::from_secs(super::super::config::DEFAULT_TIMEOUT_SECS)
        );

        let err = SerpProClientBuilder::new()
            .api_key("k")
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_verify_ssl_flag_kept() {
        let client = SerpProClientBuilder::new()
            .api_key("k")
            .verify_ssl(false)
            .build()
            .unwrap();
        assert!(!client.verify_ssl());
    }
}
