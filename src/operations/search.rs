use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::ApiRequest;
use crate::credentials::LumifyCredentials;
use crate::error::NodeError;
use crate::operations::ParamReader;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub options: SearchOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub answer_mode: Option<bool>,
    pub similar_questions: Option<bool>,
}

impl SearchParams {
    pub fn from_params(params: &Map<String, Value>, item_index: usize) -> Result<Self, NodeError> {
        let reader = ParamReader::new(params, item_index);
        let options = reader.collection("searchOptions")?;
        Ok(Self {
            query: reader.required("query")?,
            options: SearchOptions {
                answer_mode: options.optional("answer_mode")?,
                similar_questions: options.optional("similar_questions")?,
            },
        })
    }
}

/// Body of `POST /search.php`. Unset options are left out entirely so the
/// server applies its own defaults.
#[derive(Debug, Serialize)]
pub struct SearchBody<'a> {
    pub query: &'a str,
    pub application_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_questions: Option<bool>,
}

pub fn build_request(
    url: &str,
    item_index: usize,
    params: &Map<String, Value>,
    credentials: &LumifyCredentials,
) -> Result<ApiRequest, NodeError> {
    let application_id = require_application_id(credentials, item_index)?;

    let params = SearchParams::from_params(params, item_index)?;

    let body = SearchBody {
        query: &params.query,
        application_id,
        answer_mode: params.options.answer_mode,
        similar_questions: params.options.similar_questions,
    };

    Ok(ApiRequest::post_json(url, &body)?)
}

/// Search is scoped to an application; without its id there is nothing to call.
pub fn require_application_id(credentials: &LumifyCredentials, item_index: usize) -> Result<&str, NodeError> {
    credentials
        .application_id()
        .ok_or(NodeError::MissingApplicationId { item_index })
}
