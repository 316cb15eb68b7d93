use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::client::{ApiRequest, HttpTransport};
use crate::credentials::LumifyCredentials;
use crate::error::TransportError;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client (proxies, TLS, pooling).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Build a transport whose requests give up after `timeout`.
    /// `None` keeps the client default.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest, credentials: &LumifyCredentials) -> Result<Value, TransportError> {
        let builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&request.body);
        let builder = credentials.authenticate(builder);

        let response = builder.send().await?;
        let status = response.status();
        debug!(url = %request.url, status = status.as_u16(), "Lumify API responded");

        let text = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(parse_body(&text))
    }
}

/// Response bodies are passed through. Non-JSON text comes back as a string,
/// an empty body as an empty object.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_str::<Value>(text) {
        Ok(json) => json,
        Err(_) => Value::String(text.to_string()),
    }
}
