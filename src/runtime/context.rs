use serde_json::{Map, Value};
use uuid::Uuid;

use crate::credentials::LumifyCredentials;
use crate::runtime::item::InputItem;

static NULL: Value = Value::Null;

/// 执行上下文 (Execution Context)
/// 一次节点执行所需的全部输入：条目、原始参数、凭据和失败策略
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub execution_id: Uuid,
    pub items: Vec<InputItem>,
    /// Node parameters as configured, expressions unresolved.
    pub parameters: Map<String, Value>,
    pub credentials: Option<LumifyCredentials>,
    pub continue_on_fail: bool,
}

impl ExecutionContext {
    pub fn new(items: Vec<InputItem>, parameters: Map<String, Value>) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            items,
            parameters,
            credentials: None,
            continue_on_fail: false,
        }
    }

    pub fn with_credentials(mut self, credentials: LumifyCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Parameter `name` exactly as configured, without expression resolution.
    pub fn raw_parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Parameter `name` as seen by item `item_index`, with `{{ $json.path }}`
    /// expressions resolved against that item. `None` if the parameter is not
    /// configured or its expression does not resolve.
    pub fn get_node_parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        let raw = self.raw_parameter(name)?;
        let item = self.items.get(item_index).map(|i| &i.json).unwrap_or(&NULL);
        resolve_expressions(raw, item)
    }
}

fn resolve_expressions(value: &Value, item: &Value) -> Option<Value> {
    match value {
        Value::String(s) => match expression_path(s) {
            Some(path) => lookup(item, path).cloned(),
            None => Some(value.clone()),
        },
        Value::Object(obj) => {
            let resolved = obj
                .iter()
                .filter_map(|(k, v)| resolve_expressions(v, item).map(|v| (k.clone(), v)))
                .collect();
            Some(Value::Object(resolved))
        }
        Value::Array(list) => Some(Value::Array(
            list.iter().filter_map(|v| resolve_expressions(v, item)).collect(),
        )),
        other => Some(other.clone()),
    }
}

/// `"{{ $json.a.b }}"` or `"={{ $json.a.b }}"` -> `Some("a.b")`.
fn expression_path(s: &str) -> Option<&str> {
    let s = s.strip_prefix('=').unwrap_or(s).trim();
    let inner = s.strip_prefix("{{")?.strip_suffix("}}")?.trim();
    if inner == "$json" {
        return Some("");
    }
    inner.strip_prefix("$json.").map(str::trim)
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(obj) => obj.get(segment),
        Value::Array(list) => segment.parse::<usize>().ok().and_then(|i| list.get(i)),
        _ => None,
    })
}
