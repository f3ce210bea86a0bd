#![allow(dead_code)]

use async_trait::async_trait;
use serppro_client::transport::{PreparedRequest, RawResponse, Transport};
use serppro_client::{Result, SerpProClient};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that answers from canned responses and records every call.
#[derive(Default)]
pub struct StubTransport {
    calls: AtomicUsize,
    seen: Mutex<Vec<(PreparedRequest, String)>>,
    responses: Mutex<HashMap<&'static str, RawResponse>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer requests for `path` with `status` and `body`.
    pub fn respond(&self, path: &'static str, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(path, RawResponse::new(status, body));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(r, _)| r.clone())
            .collect()
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(_, id)| id.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: &PreparedRequest, request_id: &str) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((request.clone(), request_id.to_string()));
        let canned = self.responses.lock().unwrap().get(request.path).cloned();
        Ok(canned.unwrap_or_else(|| RawResponse::new(404, "")))
    }
}

pub fn client_with(stub: &Arc<StubTransport>) -> SerpProClient {
    SerpProClient::builder()
        .api_key("test-key")
        .transport(stub.clone())
        .build()
        .unwrap()
}
