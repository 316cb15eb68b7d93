use lumify::client::ApiRequest;
use lumify::config::{Endpoints, LAST30DAYS_URL, SEARCH_URL};
use lumify::credentials::LumifyCredentials;
use lumify::error::NodeError;
use lumify::operations::{LumifyNode, NodeType};
use reqwest::Method;
use serde_json::{Map, Value, json};

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("params must be an object")
}

fn creds_with_app() -> LumifyCredentials {
    LumifyCredentials::new("lmfy-abc", Some("app1".to_string()))
}

#[test]
fn test_search_body_has_query_and_application_id() {
    let node = LumifyNode::default();
    let request = node
        .build_request("search", 0, &params(json!({ "query": "reset password" })), &creds_with_app())
        .expect("build failed");

    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, SEARCH_URL);
    assert_eq!(request.body, json!({ "query": "reset password", "application_id": "app1" }));
}

#[test]
fn test_search_forwards_only_given_options() {
    let node = LumifyNode::default();

    let only_answer = node
        .build_request(
            "search",
            0,
            &params(json!({ "query": "q", "searchOptions": { "answer_mode": false } })),
            &creds_with_app(),
        )
        .unwrap();
    assert_eq!(only_answer.body, json!({ "query": "q", "application_id": "app1", "answer_mode": false }));
    assert!(only_answer.body.get("similar_questions").is_none());

    let both = node
        .build_request(
            "search",
            0,
            &params(json!({
                "query": "q",
                "searchOptions": { "answer_mode": true, "similar_questions": true }
            })),
            &creds_with_app(),
        )
        .unwrap();
    assert_eq!(both.body["answer_mode"], json!(true));
    assert_eq!(both.body["similar_questions"], json!(true));
}

#[test]
fn test_search_requires_application_id() {
    let node = LumifyNode::default();
    let p = params(json!({ "query": "q" }));

    for app_id in [None, Some(String::new())] {
        let creds = LumifyCredentials::new("lmfy-abc", app_id);
        let err = node.build_request("search", 3, &p, &creds).unwrap_err();
        assert!(matches!(err, NodeError::MissingApplicationId { item_index: 3 }));
        assert!(err.to_string().starts_with("Application ID is required for the Search operation"));
        assert_eq!(err.item_index(), Some(3));
    }
}

#[test]
fn test_last30days_minimal_body() {
    let node = LumifyNode::default();
    let request = node
        .build_request("last30days", 0, &params(json!({ "topic": "AI agents" })), &creds_with_app())
        .unwrap();

    assert_eq!(request.url, LAST30DAYS_URL);
    assert_eq!(request.body, json!({ "topic": "AI agents" }));
}

#[test]
fn test_last30days_does_not_need_application_id() {
    let node = LumifyNode::default();
    let creds = LumifyCredentials::new("lmfy-abc", None);
    let request = node
        .build_request("last30days", 0, &params(json!({ "topic": "Rust" })), &creds)
        .unwrap();
    assert_eq!(request.body["topic"], json!("Rust"));
}

#[test]
fn test_last30days_full_body() {
    let node = LumifyNode::default();
    let request = node
        .build_request(
            "last30days",
            0,
            &params(json!({
                "topic": "React Server Components",
                "last30daysOptions": {
                    "sources": ["reddit", "web", "reddit"],
                    "days": 7,
                    "max_results": 10,
                    "output_format": "bullets"
                }
            })),
            &creds_with_app(),
        )
        .unwrap();

    assert_eq!(
        request.body,
        json!({
            "topic": "React Server Components",
            "sources": ["reddit", "web"],
            "days": 7,
            "max_results": 10,
            "output_format": "bullets"
        })
    );
}

#[test]
fn test_last30days_never_sends_nulls() {
    let node = LumifyNode::default();
    let request = node
        .build_request(
            "last30days",
            0,
            &params(json!({ "topic": "t", "last30daysOptions": { "days": 1 } })),
            &creds_with_app(),
        )
        .unwrap();

    let body = request.body.as_object().unwrap();
    assert_eq!(body.len(), 2);
    assert!(body.values().all(|v| !v.is_null()));
}

#[test]
fn test_unknown_operation() {
    let node = LumifyNode::default();
    let err = node
        .build_request("delete", 2, &Map::new(), &creds_with_app())
        .unwrap_err();

    assert_eq!(err.to_string(), "Unknown operation: delete");
    assert_eq!(err.item_index(), Some(2));
}

#[test]
fn test_invalid_source_is_rejected() {
    let node = LumifyNode::default();
    let err = node
        .build_request(
            "last30days",
            1,
            &params(json!({ "topic": "t", "last30daysOptions": { "sources": ["myspace"] } })),
            &creds_with_app(),
        )
        .unwrap_err();
    assert!(matches!(err, NodeError::InvalidParameter { item_index: 1, .. }));
}

#[test]
fn test_invalid_option_names_the_field() {
    let node = LumifyNode::default();

    let err = node
        .build_request(
            "last30days",
            0,
            &params(json!({ "topic": "t", "last30daysOptions": { "days": "a week" } })),
            &creds_with_app(),
        )
        .unwrap_err();
    match err {
        NodeError::InvalidParameter { name, .. } => assert_eq!(name, "days"),
        other => panic!("unexpected error: {other}"),
    }

    let err = node
        .build_request(
            "last30days",
            0,
            &params(json!({ "topic": "t", "last30daysOptions": { "sources": ["myspace"] } })),
            &creds_with_app(),
        )
        .unwrap_err();
    assert!(err.to_string().starts_with("Invalid value for parameter 'sources'"), "unexpected: {err}");
}

#[test]
fn test_last30days_numbers_are_forwarded_unchanged() {
    let node = LumifyNode::default();
    let request = node
        .build_request(
            "last30days",
            0,
            &params(json!({ "topic": "t", "last30daysOptions": { "days": 7.5, "max_results": 10 } })),
            &creds_with_app(),
        )
        .unwrap();
    assert_eq!(request.body, json!({ "topic": "t", "days": 7.5, "max_results": 10 }));
}

#[test]
fn test_custom_endpoints_are_used() {
    let node = LumifyNode::new(Endpoints {
        search: "http://localhost:9000/search".to_string(),
        last30days: "http://localhost:9000/last30".to_string(),
    });
    let request = node
        .build_request("last30days", 0, &params(json!({ "topic": "t" })), &creds_with_app())
        .unwrap();
    assert_eq!(request, ApiRequest::post("http://localhost:9000/last30", json!({ "topic": "t" })));
}
