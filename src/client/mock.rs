//! `MockTransport`: a test double for [`HttpTransport`].
//!
//! Records every request it receives and replays scripted responses in order.
//! Once the script is exhausted it answers with the fallback response.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::{ApiRequest, HttpTransport};
use crate::credentials::LumifyCredentials;
use crate::error::TransportError;

/// What the transport answers for one call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    /// Non-2xx answer from the remote API.
    Status(u16, String),
    /// Connection-level failure.
    Fail(String),
}

impl MockResponse {
    fn into_result(self) -> Result<Value, TransportError> {
        match self {
            MockResponse::Json(v) => Ok(v),
            MockResponse::Status(status, body) => Err(TransportError::Status { status, body }),
            MockResponse::Fail(msg) => Err(TransportError::Other(msg)),
        }
    }
}

/// A request as seen by the transport, with the header it would carry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub request: ApiRequest,
    pub authorization: String,
}

#[derive(Debug, Clone)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    fallback: MockResponse,
    /// All requests seen by this transport (in call order).
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    /// A transport that always answers with `value`.
    pub fn returning(value: Value) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: MockResponse::Json(value),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A transport that always fails with `msg`.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            fallback: MockResponse::Fail(msg.into()),
            ..Self::returning(json!({}))
        }
    }

    /// Answer the next calls with `responses`, in order, before falling back.
    pub fn with_script(self, responses: impl IntoIterator<Item = MockResponse>) -> Self {
        lock(&self.script).extend(responses);
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: &ApiRequest, credentials: &LumifyCredentials) -> Result<Value, TransportError> {
        lock(&self.calls).push(RecordedCall {
            request: request.clone(),
            authorization: credentials.authorization_header(),
        });

        let next = lock(&self.script).pop_front();
        next.unwrap_or_else(|| self.fallback.clone()).into_result()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
