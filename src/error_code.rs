//! 服务端错误分类：根据 HTTP 状态码划分错误类别及调用方重试提示。
//!
//! Status classes for errors reported by the SerpPro service.
//!
//! The service signals failures with an HTTP status plus an optional
//! `{ id, error_message, instance, invalid_data }` body. The status alone is
//! enough to tell a caller-side input problem from a billing or service-side
//! one, which is what [`ApiErrorClass`] captures.
//!
//! | Category | Classes                                                      |
//! |----------|--------------------------------------------------------------|
//! | client   | invalid_request, authentication, permission_denied, not_found |
//! | billing  | payment_required                                             |
//! | rate     | rate_limited                                                 |
//! | server   | server_error, unavailable                                    |
//! | unknown  | unknown                                                      |
//!
//! ## Example
//!
//! ```rust
//! use serppro_client::error_code::ApiErrorClass;
//!
//! let class = ApiErrorClass::from_http_status(422);
//! assert_eq!(class.name(), "invalid_request");
//! assert!(!class.caller_may_retry());
//! ```

use std::fmt;

/// Classification of an API error by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorClass {
    /// 400 / 422: malformed request or parameters the service could not process
    InvalidRequest,
    /// 401: missing or unknown API key
    Authentication,
    /// 402: balance exhausted for the billed service
    PaymentRequired,
    /// 403: key valid but not allowed to use the method
    PermissionDenied,
    /// 404: unknown endpoint
    NotFound,
    /// 429: too many requests
    RateLimited,
    /// 500: internal failure on the service side
    ServerError,
    /// 502 / 503 / 504: service temporarily unreachable or overloaded
    Unavailable,
    Unknown,
}

impl ApiErrorClass {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PaymentRequired => "payment_required",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the category: `"client"`, `"billing"`, `"rate"`, `"server"` or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidRequest
            | Self::Authentication
            | Self::PermissionDenied
            | Self::NotFound => "client",
            Self::PaymentRequired => "billing",
            Self::RateLimited => "rate",
            Self::ServerError | Self::Unavailable => "server",
            Self::Unknown => "unknown",
        }
    }

    /// Hint for callers running their own retry loop. The client never retries.
    #[inline]
    pub fn caller_may_retry(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError | Self::Unavailable
        )
    }

    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidRequest,
            401 => Self::Authentication,
            402 => Self::PaymentRequired,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500 => Self::ServerError,
            502..=504 => Self::Unavailable,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ApiErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
