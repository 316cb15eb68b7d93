use thiserror::Error;

/// Failure of a single HTTP exchange with the Lumify API.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a transport that is not backed by reqwest, such
    /// as [`crate::client::mock::MockTransport`].
    #[error("{0}")]
    Other(String),
}

/// Errors raised while executing the node.
///
/// Everything carrying an `item_index` is local to one input item and can be
/// turned into an error record when "continue on failure" is set.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error(
        "Application ID is required for the Search operation. Please add it to your Lumify credentials."
    )]
    MissingApplicationId { item_index: usize },

    #[error("Unknown operation: {operation}")]
    UnknownOperation { operation: String, item_index: usize },

    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String, item_index: usize },

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter {
        name: String,
        reason: String,
        item_index: usize,
    },

    #[error("{source}")]
    Request {
        item_index: usize,
        #[source]
        source: TransportError,
    },

    #[error("No credentials configured for '{0}'")]
    MissingCredentials(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl NodeError {
    /// Index of the input item that caused the error, if the error is item-local.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            NodeError::MissingApplicationId { item_index }
            | NodeError::UnknownOperation { item_index, .. }
            | NodeError::MissingParameter { item_index, .. }
            | NodeError::InvalidParameter { item_index, .. }
            | NodeError::Request { item_index, .. } => Some(*item_index),
            NodeError::MissingCredentials(_) | NodeError::Encode(_) => None,
        }
    }
}
