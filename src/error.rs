use crate::error_code::ApiErrorClass;
use crate::transport::TransportError;
use serde::Deserialize;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Request field or payload path that caused the error (e.g., "start_date", "items[2].date")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "request_validator", "response_mapper")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Error body returned by the service for rejected requests.
///
/// Every field is optional upstream; an empty body still yields a model with
/// all fields unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub id: Option<String>,
    pub error_message: Option<String>,
    pub instance: Option<String>,
    pub invalid_data: Option<Vec<String>>,
}

/// A request the remote service rejected or failed to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response.
    pub status: u16,
    pub class: ApiErrorClass,
    /// Machine error identifier reported by the service (e.g. `ERR_INVALID_REGION`).
    pub error_id: Option<String>,
    pub message: String,
    /// Request path the service reports the error for.
    pub instance: Option<String>,
    /// Submitted fields the service considered invalid.
    pub invalid_data: Vec<String>,
    /// Correlation id sent with the request.
    pub request_id: Option<String>,
}

impl ApiError {
    /// Build from a status and the parsed error body.
    pub fn from_body(status: u16, body: ApiErrorBody) -> Self {
        let message = body
            .error_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_status_message(status));
        Self {
            status,
            class: ApiErrorClass::from_http_status(status),
            error_id: body.id,
            message,
            instance: body.instance,
            invalid_data: body.invalid_data.unwrap_or_default(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Whether the service named `field` among the invalid inputs.
    pub fn is_invalid_field(&self, field: &str) -> bool {
        self.invalid_data.iter().any(|f| f == field)
    }
}

fn default_status_message(status: u16) -> String {
    if status == 422 {
        "Unprocessable Content - invalid query".to_string()
    } else {
        format!("HTTP {}", status)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} ({}): {}", self.status, self.class, self.message)?;
        if let Some(ref id) = self.error_id {
            write!(f, " [id: {}]", id)?;
        }
        if !self.invalid_data.is_empty() {
            write!(f, " [invalid: {}]", self.invalid_data.join(", "))?;
        }
        Ok(())
    }
}

/// Discriminant of [`Error`], for callers that branch on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Transport,
    Api,
    Mapping,
    Configuration,
}

/// Unified error type for the SerpPro client.
///
/// Every failure of an operation is one of four kinds: local validation, transport,
/// remote API rejection or an unexpected response shape. Configuration errors only
/// come out of client construction.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error: {0}")]
    Api(Box<ApiError>),

    #[error("Response mapping error ({operation}): {message}{}", format_context(.context))]
    Mapping {
        operation: String,
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Validation failure on a named request field.
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            context: ErrorContext::new()
                .with_field_path(field)
                .with_source("request_validator"),
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn mapping_with_context(
        operation: impl Into<String>,
        msg: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        Error::Mapping {
            operation: operation.into(),
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Api(_) => ErrorKind::Api,
            Error::Mapping { .. } => ErrorKind::Mapping,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. }
            | Error::Mapping { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The offending request field of a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { context, .. } => context.field_path.as_deref(),
            _ => None,
        }
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_includes_field() {
        let err = Error::invalid_field("device", "unknown value 'Watch'");
        assert_eq!(
            err.to_string(),
            "Validation error: unknown value 'Watch' (field: device, source: request_validator)"
        );
        assert_eq!(err.field(), Some("device"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_api_error_from_body() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"id":"ERR_INVALID_REGION","error_message":"bad region","invalid_data":["region"]}"#,
        )
        .unwrap();
        let err = ApiError::from_body(422, body);
        assert_eq!(err.error_id.as_deref(), Some("ERR_INVALID_REGION"));
        assert_eq!(err.class, ApiErrorClass::InvalidRequest);
        assert!(err.is_invalid_field("region"));
        assert_eq!(
            err.to_string(),
            "HTTP 422 (invalid_request): bad region [id: ERR_INVALID_REGION] [invalid: region]"
        );
    }

    #[test]
    fn test_api_error_default_messages() {
        let err = ApiError::from_body(422, ApiErrorBody::default());
        assert_eq!(err.message, "Unprocessable Content - invalid query");
        assert!(err.invalid_data.is_empty());

        let err = ApiError::from_body(502, ApiErrorBody::default());
        assert_eq!(err.message, "HTTP 502");
    }

    #[test]
    fn test_context_only_for_local_kinds() {
        let err: Error = ApiError::from_body(500, ApiErrorBody::default()).into();
        assert!(err.context().is_none());
        assert!(err.as_api().is_some());
        assert_eq!(err.kind(), ErrorKind::Api);
    }
}
