pub mod lumify;
pub mod resolver;

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use lumify::lumify_description;
pub use resolver::ParameterResolver;

/// 节点描述：宿主用它渲染参数面板，并据此解析参数
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub icon: String,
    pub group: Vec<String>,
    pub version: u32,
    pub subtitle: String,
    pub description: String,
    pub defaults: NodeDefaults,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub credentials: Vec<CredentialRequirement>,
    pub request_defaults: RequestDefaults,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeDefaults {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialRequirement {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDefaults {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PropertyKind {
    String,
    Boolean,
    Number,
    Options { options: Vec<PropertyOption> },
    MultiOptions { options: Vec<PropertyOption> },
    Collection { options: Vec<NodeProperty> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyOption {
    pub name: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl PropertyOption {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
            action: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub password: bool,
}

impl TypeOptions {
    fn is_empty(&self) -> bool {
        self.min_value.is_none() && self.max_value.is_none() && !self.password
    }
}

/// Visibility rule: the property is shown only when every listed field
/// currently holds one of the listed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<String, Vec<Value>>,
}

/// One user-facing parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
    pub default: Value,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_data_expression: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "TypeOptions::is_empty")]
    pub type_options: TypeOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl NodeProperty {
    fn new(display_name: impl Into<String>, name: impl Into<String>, kind: PropertyKind, default: Value) -> Self {
        Self {
            display_name: display_name.into(),
            name: name.into(),
            kind,
            default,
            required: false,
            no_data_expression: false,
            description: None,
            placeholder: None,
            type_options: TypeOptions::default(),
            display_options: None,
        }
    }

    pub fn string(display_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(display_name, name, PropertyKind::String, Value::String(String::new()))
    }

    pub fn boolean(display_name: impl Into<String>, name: impl Into<String>, default: bool) -> Self {
        Self::new(display_name, name, PropertyKind::Boolean, Value::Bool(default))
    }

    pub fn number(display_name: impl Into<String>, name: impl Into<String>, default: i64) -> Self {
        Self::new(display_name, name, PropertyKind::Number, Value::from(default))
    }

    pub fn options(
        display_name: impl Into<String>,
        name: impl Into<String>,
        options: Vec<PropertyOption>,
        default: impl Into<Value>,
    ) -> Self {
        Self::new(display_name, name, PropertyKind::Options { options }, default.into())
    }

    pub fn multi_options(
        display_name: impl Into<String>,
        name: impl Into<String>,
        options: Vec<PropertyOption>,
        default: Vec<&str>,
    ) -> Self {
        let default = Value::Array(default.into_iter().map(Value::from).collect());
        Self::new(display_name, name, PropertyKind::MultiOptions { options }, default)
    }

    pub fn collection(display_name: impl Into<String>, name: impl Into<String>, options: Vec<NodeProperty>) -> Self {
        Self::new(display_name, name, PropertyKind::Collection { options }, Value::Object(Map::new()))
            .placeholder("Add Option")
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn no_data_expression(mut self) -> Self {
        self.no_data_expression = true;
        self
    }

    pub fn password(mut self) -> Self {
        self.type_options.password = true;
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.type_options.min_value = Some(min);
        self.type_options.max_value = Some(max);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Show this property only when `field` holds one of `values`.
    pub fn show_when(mut self, field: &str, values: &[&str]) -> Self {
        let show = &mut self.display_options.get_or_insert_with(DisplayOptions::default).show;
        show.insert(field.to_string(), values.iter().map(|v| Value::from(*v)).collect());
        self
    }

    /// Whether the property applies to the given operation.
    ///
    /// Only the `operation` field is consulted; properties without display
    /// rules are always visible.
    pub fn is_visible(&self, operation: &str) -> bool {
        match &self.display_options {
            None => true,
            Some(display) => display
                .show
                .get("operation")
                .is_none_or(|values| values.iter().any(|v| v.as_str() == Some(operation))),
        }
    }

    /// Allowed values for `options` / `multiOptions` properties.
    pub fn allowed_values(&self) -> Option<&[PropertyOption]> {
        match &self.kind {
            PropertyKind::Options { options } | PropertyKind::MultiOptions { options } => Some(options.as_slice()),
            _ => None,
        }
    }
}
