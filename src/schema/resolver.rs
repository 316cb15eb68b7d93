use serde_json::{Map, Value};

use crate::config::DefaultPolicy;
use crate::error::NodeError;
use crate::runtime::context::ExecutionContext;
use crate::schema::{NodeDescription, NodeProperty, PropertyKind};

/// Resolves node parameters for one item from the declarative descriptor,
/// the way the host would before handing them to the node.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterResolver {
    policy: DefaultPolicy,
}

impl ParameterResolver {
    pub fn new(policy: DefaultPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DefaultPolicy {
        self.policy
    }

    /// The selected operation, read once. It is declared `noDataExpression`,
    /// so the configured value is taken literally.
    pub fn operation(&self, description: &NodeDescription, ctx: &ExecutionContext) -> String {
        ctx.raw_parameter("operation")
            .or_else(|| description.property("operation").map(|p| &p.default))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Parameters visible for `operation`, resolved for item `item_index`.
    pub fn resolve(
        &self,
        description: &NodeDescription,
        ctx: &ExecutionContext,
        operation: &str,
        item_index: usize,
    ) -> Result<Map<String, Value>, NodeError> {
        let mut resolved = Map::new();

        for property in description.properties.iter() {
            if property.name == "operation" || !property.is_visible(operation) {
                continue;
            }
            let configured = ctx.get_node_parameter(&property.name, item_index);

            let value = match &property.kind {
                PropertyKind::Collection { options } => {
                    self.resolve_collection(property, options, configured, item_index)?
                }
                _ => {
                    let value = coerce_scalar(property, configured.unwrap_or_else(|| property.default.clone()));
                    if property.required && is_blank(&value) {
                        return Err(NodeError::MissingParameter {
                            name: property.name.clone(),
                            item_index,
                        });
                    }
                    check_value(property, &value, item_index)?;
                    value
                }
            };
            resolved.insert(property.name.clone(), value);
        }

        Ok(resolved)
    }

    fn resolve_collection(
        &self,
        property: &NodeProperty,
        options: &[NodeProperty],
        configured: Option<Value>,
        item_index: usize,
    ) -> Result<Value, NodeError> {
        let configured = match configured {
            Some(Value::Object(obj)) => Some(obj),
            Some(Value::Null) | None => None,
            Some(other) => {
                return Err(NodeError::InvalidParameter {
                    name: property.name.clone(),
                    reason: format!("expected a collection of options, got {}", other),
                    item_index,
                });
            }
        };

        let source = match (configured, self.policy) {
            (Some(obj), _) => obj,
            (None, DefaultPolicy::CollectionDefaults) => property.default.as_object().cloned().unwrap_or_default(),
            (None, _) => Map::new(),
        };

        let mut collected = Map::new();
        for option in options {
            match source.get(&option.name) {
                Some(value) => {
                    check_value(option, value, item_index)?;
                    collected.insert(option.name.clone(), value.clone());
                }
                None if self.policy == DefaultPolicy::AllDeclared => {
                    collected.insert(option.name.clone(), option.default.clone());
                }
                None => {}
            }
        }

        Ok(Value::Object(collected))
    }
}

/// Expressions can yield numbers or booleans for text fields; the host
/// renders those as their text.
fn coerce_scalar(property: &NodeProperty, value: Value) -> Value {
    match (&property.kind, value) {
        (PropertyKind::String, Value::Number(n)) => Value::String(n.to_string()),
        (PropertyKind::String, Value::Bool(b)) => Value::String(b.to_string()),
        (_, value) => value,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn check_value(property: &NodeProperty, value: &Value, item_index: usize) -> Result<(), NodeError> {
    let invalid = |reason: String| NodeError::InvalidParameter {
        name: property.name.clone(),
        reason,
        item_index,
    };

    match &property.kind {
        PropertyKind::String => {
            if !value.is_string() {
                return Err(invalid(format!("expected a string, got {}", value)));
            }
        }
        PropertyKind::Boolean => {
            if !value.is_boolean() {
                return Err(invalid(format!("expected a boolean, got {}", value)));
            }
        }
        PropertyKind::Number => {
            let n = value
                .as_f64()
                .ok_or_else(|| invalid(format!("expected a number, got {}", value)))?;
            let opts = &property.type_options;
            if opts.min_value.is_some_and(|min| n < min) || opts.max_value.is_some_and(|max| n > max) {
                return Err(invalid(format!(
                    "{} is outside the allowed range {}-{}",
                    value,
                    opts.min_value.unwrap_or(f64::MIN),
                    opts.max_value.unwrap_or(f64::MAX)
                )));
            }
        }
        PropertyKind::Options { options } => {
            if !options.iter().any(|o| &o.value == value) {
                return Err(invalid(format!("{} is not one of the allowed values", value)));
            }
        }
        PropertyKind::MultiOptions { options } => {
            let list = value
                .as_array()
                .ok_or_else(|| invalid(format!("expected a list, got {}", value)))?;
            if let Some(bad) = list.iter().find(|v| !options.iter().any(|o| &o.value == *v)) {
                return Err(invalid(format!("{} is not one of the allowed values", bad)));
            }
        }
        PropertyKind::Collection { .. } => {}
    }

    Ok(())
}
