use lumify::operations::{LumifyNode, NodeType, Operation};
use lumify::schema::{PropertyKind, lumify_description};
use serde_json::json;

#[test]
fn test_description_metadata() {
    let description = serde_json::to_value(lumify_description()).unwrap();

    assert_eq!(description["displayName"], "Lumify");
    assert_eq!(description["name"], "lumify");
    assert_eq!(description["version"], 1);
    assert_eq!(description["group"], json!(["transform"]));
    assert_eq!(description["credentials"], json!([{ "name": "lumifyApi", "required": true }]));
    assert_eq!(description["requestDefaults"]["baseURL"], "https://lumify.ai/api/v1");
    assert_eq!(description["requestDefaults"]["headers"]["Content-Type"], "application/json");
}

#[test]
fn test_operation_property_lists_both_operations() {
    let description = lumify_description();
    let operation = description.property("operation").expect("operation property");

    assert!(operation.no_data_expression);
    assert_eq!(operation.default, json!("search"));
    let values: Vec<_> = operation
        .allowed_values()
        .unwrap()
        .iter()
        .map(|o| o.value.clone())
        .collect();
    assert_eq!(values, vec![json!(Operation::Search.as_str()), json!(Operation::Last30Days.as_str())]);
}

#[test]
fn test_properties_are_gated_by_operation() {
    let description = lumify_description();
    let visible = |op: &str| -> Vec<String> {
        description
            .properties
            .iter()
            .filter(|p| p.is_visible(op))
            .map(|p| p.name.clone())
            .collect()
    };

    assert_eq!(visible("search"), vec!["operation", "query", "searchOptions"]);
    assert_eq!(visible("last30days"), vec!["operation", "topic", "last30daysOptions"]);
    assert_eq!(visible("other"), vec!["operation"]);
}

#[test]
fn test_last30days_option_declarations() {
    let description = lumify_description();
    let collection = description.property("last30daysOptions").unwrap();
    let PropertyKind::Collection { options } = &collection.kind else {
        panic!("last30daysOptions must be a collection");
    };

    let days = options.iter().find(|o| o.name == "days").unwrap();
    assert_eq!(days.default, json!(30));
    assert_eq!(days.type_options.min_value, Some(1.0));
    assert_eq!(days.type_options.max_value, Some(30.0));

    let max_results = options.iter().find(|o| o.name == "max_results").unwrap();
    assert_eq!(max_results.default, json!(20));
    assert_eq!(max_results.type_options.min_value, Some(5.0));
    assert_eq!(max_results.type_options.max_value, Some(50.0));

    let sources = options.iter().find(|o| o.name == "sources").unwrap();
    assert_eq!(sources.default, json!(["twitter", "reddit", "web"]));

    let format = options.iter().find(|o| o.name == "output_format").unwrap();
    assert_eq!(format.default, json!("summary"));
}

#[test]
fn test_serialized_property_shape() {
    let description = serde_json::to_value(LumifyNode::default().description()).unwrap();
    let query = &description["properties"][1];

    assert_eq!(query["name"], "query");
    assert_eq!(query["type"], "string");
    assert_eq!(query["required"], true);
    assert_eq!(query["displayOptions"], json!({ "show": { "operation": ["search"] } }));

    let search_options = &description["properties"][2];
    assert_eq!(search_options["type"], "collection");
    assert_eq!(search_options["placeholder"], "Add Option");
    assert_eq!(search_options["options"][0]["name"], "answer_mode");
    assert_eq!(search_options["options"][0]["type"], "boolean");
    assert_eq!(search_options["options"][0]["default"], true);

    let sources = &description["properties"][4]["options"][0];
    assert_eq!(sources["type"], "multiOptions");
}
