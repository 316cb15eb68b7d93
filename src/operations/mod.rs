use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Debug};

use crate::client::ApiRequest;
use crate::config::Endpoints;
use crate::credentials::LumifyCredentials;
use crate::error::NodeError;
use crate::schema::{NodeDescription, lumify_description};

pub mod last30days;
pub mod search;

/// The closed set of supported API actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "search")]
    Search,
    #[serde(rename = "last30days")]
    Last30Days,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::Last30Days => "last30days",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "search" => Some(Operation::Search),
            "last30days" => Some(Operation::Last30Days),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 插件接口：宿主无关的节点契约
///
/// Maps resolved parameters to a request without touching the network, so
/// implementations can be exercised without a host runtime.
pub trait NodeType: Send + Sync + Debug {
    fn description(&self) -> &NodeDescription;

    /// Checks that must pass before any parameter of the item is read.
    fn check_preconditions(
        &self,
        _operation: &str,
        _item_index: usize,
        _credentials: &LumifyCredentials,
    ) -> Result<(), NodeError> {
        Ok(())
    }

    fn build_request(
        &self,
        operation: &str,
        item_index: usize,
        params: &Map<String, Value>,
        credentials: &LumifyCredentials,
    ) -> Result<ApiRequest, NodeError>;
}

#[derive(Debug, Clone)]
pub struct LumifyNode {
    description: NodeDescription,
    endpoints: Endpoints,
}

impl LumifyNode {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            description: lumify_description(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl Default for LumifyNode {
    fn default() -> Self {
        Self::new(Endpoints::default())
    }
}

impl NodeType for LumifyNode {
    fn description(&self) -> &NodeDescription {
        &self.description
    }

    fn check_preconditions(
        &self,
        operation: &str,
        item_index: usize,
        credentials: &LumifyCredentials,
    ) -> Result<(), NodeError> {
        match Operation::from_name(operation) {
            Some(Operation::Search) => search::require_application_id(credentials, item_index).map(|_| ()),
            _ => Ok(()),
        }
    }

    fn build_request(
        &self,
        operation: &str,
        item_index: usize,
        params: &Map<String, Value>,
        credentials: &LumifyCredentials,
    ) -> Result<ApiRequest, NodeError> {
        match Operation::from_name(operation) {
            Some(Operation::Search) => search::build_request(&self.endpoints.search, item_index, params, credentials),
            Some(Operation::Last30Days) => last30days::build_request(&self.endpoints.last30days, item_index, params),
            None => Err(NodeError::UnknownOperation {
                operation: operation.to_string(),
                item_index,
            }),
        }
    }
}

/// Typed access to one level of a resolved parameter map. Failures name the
/// offending parameter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParamReader<'a> {
    params: Option<&'a Map<String, Value>>,
    item_index: usize,
}

impl<'a> ParamReader<'a> {
    pub(crate) fn new(params: &'a Map<String, Value>, item_index: usize) -> Self {
        Self {
            params: Some(params),
            item_index,
        }
    }

    pub(crate) fn required<T: DeserializeOwned>(&self, name: &str) -> Result<T, NodeError> {
        self.optional(name)?.ok_or_else(|| NodeError::MissingParameter {
            name: name.to_string(),
            item_index: self.item_index,
        })
    }

    /// `None` when the parameter is absent; present values must parse as `T`.
    pub(crate) fn optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, NodeError> {
        let Some(value) = self.params.and_then(|p| p.get(name)) else {
            return Ok(None);
        };
        T::deserialize(value).map(Some).map_err(|e| NodeError::InvalidParameter {
            name: name.to_string(),
            reason: e.to_string(),
            item_index: self.item_index,
        })
    }

    /// Reader over an options collection. An absent collection reads as empty.
    pub(crate) fn collection(&self, name: &str) -> Result<ParamReader<'a>, NodeError> {
        let params = match self.params.and_then(|p| p.get(name)) {
            None | Some(Value::Null) => None,
            Some(Value::Object(obj)) => Some(obj),
            Some(other) => {
                return Err(NodeError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("expected a collection of options, got {}", other),
                    item_index: self.item_index,
                });
            }
        };
        Ok(ParamReader {
            params,
            item_index: self.item_index,
        })
    }
}
