use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::credentials::LumifyCredentials;
use crate::runtime::{ExecutionContext, InputItem};

/// One node invocation as written in a YAML job file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    /// Raw node parameters, `operation` included. Values may be `{{ $json.x }}` expressions.
    pub parameters: Map<String, Value>,
    pub items: Vec<Value>,
    pub continue_on_fail: bool,
}

impl Job {
    /// Turn the job into an execution context. A job without items runs once
    /// with an empty item, like a manual trigger.
    pub fn into_context(self, credentials: Option<LumifyCredentials>) -> ExecutionContext {
        let items = if self.items.is_empty() {
            vec![InputItem::new(Value::Object(Map::new()))]
        } else {
            self.items.into_iter().map(InputItem::new).collect()
        };

        let mut ctx = ExecutionContext::new(items, self.parameters).continue_on_fail(self.continue_on_fail);
        ctx.credentials = credentials;
        ctx
    }
}

pub fn load_job_from_yaml(file_path: impl AsRef<Path>) -> Result<Job> {
    let file_path = file_path.as_ref();
    let yaml_content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read job file from {}", file_path.display()))?;

    let job: Job = serde_yaml::from_str(&yaml_content)
        .with_context(|| format!("Failed to deserialize job from {}", file_path.display()))?;

    Ok(job)
}
