//! The `lumifyApi` credential type: what is stored, how it is injected into
//! requests, and how the host checks that it works.

use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use tracing::info;

use crate::client::{ApiRequest, HttpTransport};
use crate::config::Endpoints;
use crate::error::TransportError;
use crate::schema::NodeProperty;

pub const CREDENTIAL_NAME: &str = "lumifyApi";

/// Stored secrets for the Lumify API. Never mutated by the node.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumifyCredentials {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "appId", default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl LumifyCredentials {
    pub fn new(api_key: impl Into<String>, app_id: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            app_id,
        }
    }

    /// The application id, if one was stored and it is not blank.
    pub fn application_id(&self) -> Option<&str> {
        self.app_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn has_application_id(&self) -> bool {
        self.application_id().is_some()
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Inject `Authorization: Bearer <apiKey>` into an outgoing request.
    pub fn authenticate(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header(AUTHORIZATION, self.authorization_header())
    }
}

impl fmt::Debug for LumifyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LumifyCredentials")
            .field("api_key", &"<redacted>")
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Credential descriptor handed to the host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialType {
    pub name: String,
    pub display_name: String,
    pub documentation_url: String,
    pub properties: Vec<NodeProperty>,
}

impl CredentialType {
    pub fn lumify() -> Self {
        Self {
            name: CREDENTIAL_NAME.to_string(),
            display_name: "Lumify API".to_string(),
            documentation_url: "https://docs.lumify.ai".to_string(),
            properties: vec![
                NodeProperty::string("API Key", "apiKey")
                    .password()
                    .required()
                    .description(
                        "Your Lumify API key (format: lmfy-xxxxx). Get it from your Lumify Dashboard.",
                    ),
                NodeProperty::string("Application ID", "appId").description(
                    "Your Application ID (required for Search operation). Find it in your Lumify Dashboard.",
                ),
            ],
        }
    }

    /// Static request the host sends to validate a stored credential.
    pub fn test_request(endpoints: &Endpoints) -> ApiRequest {
        ApiRequest::post(
            endpoints.last30days.clone(),
            json!({
                "topic": "test",
                "days": 1,
                "max_results": 5,
            }),
        )
    }
}

/// Send the credential test request. The remote answer decides the outcome.
pub async fn test_credentials(
    transport: &dyn HttpTransport,
    credentials: &LumifyCredentials,
    endpoints: &Endpoints,
) -> Result<Value, TransportError> {
    let request = CredentialType::test_request(endpoints);
    info!(url = %request.url, "Testing Lumify credentials");
    transport.send(&request, credentials).await
}

