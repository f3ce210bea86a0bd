//! 请求执行逻辑：单次发送已校验的请求，不做重试。
//!
//! Request execution: one validated request, one exchange, no retry.

use super::core::SerpProClient;
use super::error_classification::classify;
use crate::transport::PreparedRequest;
use crate::Result;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

impl SerpProClient {
    /// Send `prepared` exactly once and classify the outcome.
    ///
    /// Returns the raw payload of a 2xx response; mapping to the typed result
    /// is up to the caller.
    pub(crate) async fn dispatch(&self, prepared: PreparedRequest) -> Result<Value> {
        let request_id = Uuid::new_v4().to_string();
        let operation = prepared.operation;

        debug!(
            operation = operation.name(),
            request_id = request_id.as_str(),
            method = prepared.method.as_str(),
            path = prepared.path,
            "dispatching request"
        );

        let start = std::time::Instant::now();
        let outcome = self.transport.send(&prepared, &request_id).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                info!(
                    operation = operation.name(),
                    request_id = request_id.as_str(),
                    duration_ms,
                    error = %e,
                    "request failed before a response arrived"
                );
                return Err(e);
            }
        };

        info!(
            operation = operation.name(),
            request_id = request_id.as_str(),
            status = response.status,
            duration_ms,
            "request completed"
        );

        classify(operation, response, &request_id)
    }
}
