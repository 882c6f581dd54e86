use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use client::{ApiRequest, ApiResponse, Transport, TransportError};
use serde_json::Value;
use tokio::sync::oneshot;

struct Scripted {
    outcome: Result<ApiResponse, TransportError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Transport answering from per-endpoint queues of scripted responses and
/// recording every request it sees.
#[derive(Default)]
pub struct FakeTransport {
    scripts: RefCell<HashMap<String, VecDeque<Scripted>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

fn key(method: &str, path: &str) -> String {
    format!("{method} {path}")
}

impl FakeTransport {
    fn push(&self, method: &str, path: &str, scripted: Scripted) {
        self.scripts
            .borrow_mut()
            .entry(key(method, path))
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.push(
            method,
            path,
            Scripted {
                outcome: Ok(ApiResponse::new(status, body.to_string())),
                gate: None,
            },
        );
    }

    /// Scripts a response that is only delivered once the returned sender
    /// fires (or is dropped).
    pub fn respond_later(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: Value,
    ) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.push(
            method,
            path,
            Scripted {
                outcome: Ok(ApiResponse::new(status, body.to_string())),
                gate: Some(gate),
            },
        );
        release
    }

    pub fn fail(&self, method: &str, path: &str, error: TransportError) {
        self.push(
            method,
            path,
            Scripted {
                outcome: Err(error),
                gate: None,
            },
        );
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = key(request.method.as_str(), &request.path);
        self.requests.borrow_mut().push(request);
        let scripted = self
            .scripts
            .borrow_mut()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        let Some(scripted) = scripted else {
            return Err(TransportError::Unreachable(format!(
                "no scripted response for {key}"
            )));
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.outcome
    }
}
