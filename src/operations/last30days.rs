use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::client::ApiRequest;
use crate::error::NodeError;
use crate::operations::ParamReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Reddit,
    Twitter,
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Summary,
    Bullets,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Last30DaysParams {
    /// Up to 200 characters; the API enforces it, not us.
    pub topic: String,
    pub options: Last30DaysOptions,
}

/// Numbers are kept as given (`7.0` stays `7.0`) and forwarded unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Last30DaysOptions {
    pub sources: Option<Vec<Source>>,
    pub days: Option<Number>,
    pub max_results: Option<Number>,
    pub output_format: Option<OutputFormat>,
}

impl Last30DaysParams {
    pub fn from_params(params: &Map<String, Value>, item_index: usize) -> Result<Self, NodeError> {
        let reader = ParamReader::new(params, item_index);
        let options = reader.collection("last30daysOptions")?;
        Ok(Self {
            topic: reader.required("topic")?,
            options: Last30DaysOptions {
                sources: options.optional("sources")?,
                days: options.optional("days")?,
                max_results: options.optional("max_results")?,
                output_format: options.optional("output_format")?,
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Last30DaysBody<'a> {
    pub topic: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

pub fn build_request(url: &str, item_index: usize, params: &Map<String, Value>) -> Result<ApiRequest, NodeError> {
    let params = Last30DaysParams::from_params(params, item_index)?;
    let options = params.options;

    let body = Last30DaysBody {
        topic: &params.topic,
        sources: options.sources.map(dedup_sources),
        days: options.days,
        max_results: options.max_results,
        output_format: options.output_format,
    };

    Ok(ApiRequest::post_json(url, &body)?)
}

/// Sources form a set; keep the first occurrence of each.
fn dedup_sources(sources: Vec<Source>) -> Vec<Source> {
    let mut unique = Vec::with_capacity(sources.len());
    for source in sources {
        if !unique.contains(&source) {
            unique.push(source);
        }
    }
    unique
}
