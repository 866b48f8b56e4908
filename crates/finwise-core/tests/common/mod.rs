#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Barrier;

use finwise_core::api::Transport;
use finwise_core::auth::{MemoryCredentialStore, SessionTerminator};
use finwise_core::{ApiClient, ApiError, ApiResponse, RequestDescriptor};

/// In-memory backend: answers from per-path queues and records every request.
#[derive(Default)]
pub struct FakeBackend {
    routes: Mutex<HashMap<String, VecDeque<ApiResponse>>>,
    sent: Mutex<Vec<RequestDescriptor>>,
    auth_gate: Mutex<Option<Arc<Barrier>>>,
}

impl FakeBackend {
    /// Hold every 401 until `calls` of them are in flight, so concurrent
    /// calls are all rejected before any of them refreshes.
    pub fn hold_auth_failures(&self, calls: usize) {
        *self.auth_gate.lock().unwrap() = Some(Arc::new(Barrier::new(calls)));
    }

    pub fn reply(&self, path: &str, status: u16, body: Value) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(ApiResponse::json_body(status, &body));
        self
    }

    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, path: &str) -> Vec<RequestDescriptor> {
        self.sent().into_iter().filter(|r| r.path == path).collect()
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn execute(&self, request: &RequestDescriptor) -> Result<ApiResponse, ApiError> {
        self.sent.lock().unwrap().push(request.clone());
        let next = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&request.path)
            .and_then(|q| q.pop_front());
        let response = next.unwrap_or_else(|| ApiResponse::json_body(404, &json!({"detail": "Not found."})));

        let gate = self.auth_gate.lock().unwrap().clone();
        if let Some(gate) = gate.filter(|_| response.is_auth_failure()) {
            gate.wait().await;
        }
        Ok(response)
    }
}

#[derive(Default)]
pub struct CountingTerminator {
    calls: AtomicUsize,
}

impl CountingTerminator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SessionTerminator for CountingTerminator {
    fn terminate(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct TestApp {
    pub backend: Arc<FakeBackend>,
    pub store: Arc<MemoryCredentialStore>,
    pub terminator: Arc<CountingTerminator>,
    pub client: ApiClient,
}

pub fn app(access: Option<&str>, refresh: Option<&str>) -> TestApp {
    let backend = Arc::new(FakeBackend::default());
    let store = Arc::new(MemoryCredentialStore::with_tokens(access, refresh));
    let terminator = Arc::new(CountingTerminator::default());
    let client = ApiClient::new(backend.clone(), store.clone(), terminator.clone());
    TestApp {
        backend,
        store,
        terminator,
        client,
    }
}
