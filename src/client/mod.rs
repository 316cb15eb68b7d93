use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::credentials::LumifyCredentials;
use crate::error::TransportError;

pub mod http;
pub mod mock;

pub use http::ReqwestTransport;
pub use mock::MockTransport;

/// A fully built call to the Lumify API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Value,
}

impl ApiRequest {
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body,
        }
    }

    pub fn post_json<T: Serialize>(url: impl Into<String>, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::post(url, serde_json::to_value(body)?))
    }
}

/// 传输层接口：执行一次带鉴权的请求，返回原样的 JSON 响应
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &ApiRequest, credentials: &LumifyCredentials) -> Result<Value, TransportError>;
}
