use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One element of the input batch. Its content is only consulted by parameter expressions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputItem {
    pub json: Value,
}

impl InputItem {
    pub fn new(json: Value) -> Self {
        Self { json }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One output record, linked back to the input item it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    pub json: Value,
    pub paired_item: PairedItem,
}

impl OutputItem {
    pub fn new(json: Value, item_index: usize) -> Self {
        Self {
            json,
            paired_item: PairedItem { item: item_index },
        }
    }

    pub fn error(message: impl Into<String>, item_index: usize) -> Self {
        Self::new(json!({ "error": message.into() }), item_index)
    }
}

/// Output batches of one execution. The node always emits exactly one.
pub type NodeOutput = Vec<Vec<OutputItem>>;
