//! 错误分类：区分成功响应体与 API 错误。
//!
//! Error classification: sort a completed exchange into payload or API error.

use super::mapping::parse_payload;
use crate::error::{ApiError, ApiErrorBody};
use crate::transport::RawResponse;
use crate::types::Operation;
use crate::Result;
use serde_json::Value;
use tracing::warn;

/// Any 2xx yields the parsed payload; every other status becomes an
/// [`Error::Api`](crate::Error::Api), whether or not the body is structured.
pub(crate) fn classify(
    operation: Operation,
    response: RawResponse,
    request_id: &str,
) -> Result<Value> {
    if response.is_success() {
        return parse_payload(operation, &response.body);
    }

    // Gateways answer with HTML or nothing at all; fall back to the status text.
    let body: ApiErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
    let error = ApiError::from_body(response.status, body).with_request_id(request_id);

    warn!(
        operation = operation.name(),
        request_id,
        status = error.status,
        class = error.class.name(),
        error_id = error.error_id.as_deref().unwrap_or("-"),
        "service rejected request"
    );

    Err(error.into())
}
