use serde_json::json;
use std::collections::BTreeMap;

use crate::config::BASE_URL;
use crate::credentials::CREDENTIAL_NAME;
use crate::schema::{
    CredentialRequirement, NodeDefaults, NodeDescription, NodeProperty, PropertyOption, RequestDefaults,
};

pub fn lumify_description() -> NodeDescription {
    NodeDescription {
        display_name: "Lumify".to_string(),
        name: "lumify".to_string(),
        icon: "file:lumify.png".to_string(),
        group: vec!["transform".to_string()],
        version: 1,
        subtitle: "={{$parameter[\"operation\"]}}".to_string(),
        description: "AI-powered search and research APIs from Lumify".to_string(),
        defaults: NodeDefaults {
            name: "Lumify".to_string(),
        },
        inputs: vec!["main".to_string()],
        outputs: vec!["main".to_string()],
        credentials: vec![CredentialRequirement {
            name: CREDENTIAL_NAME.to_string(),
            required: true,
        }],
        request_defaults: RequestDefaults {
            base_url: BASE_URL.to_string(),
            headers: BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]),
        },
        properties: properties(),
    }
}

fn properties() -> Vec<NodeProperty> {
    vec![
        // Operation selection
        NodeProperty::options(
            "Operation",
            "operation",
            vec![
                PropertyOption::new("Search", "search")
                    .description("Search your indexed website content and get AI-generated answers")
                    .action("Search your indexed content"),
                PropertyOption::new("Last 30 Days", "last30days")
                    .description("Research trends and discussions from social media and web sources")
                    .action("Research trends from the last 30 days"),
            ],
            "search",
        )
        .no_data_expression(),
        // Search
        NodeProperty::string("Query", "query")
            .required()
            .show_when("operation", &["search"])
            .description("The search query or natural language question")
            .placeholder("e.g., How do I reset my password?"),
        NodeProperty::collection(
            "Options",
            "searchOptions",
            vec![
                NodeProperty::boolean("Answer Mode", "answer_mode", true)
                    .description("Whether to cache high-confidence answers for faster future responses"),
                NodeProperty::boolean("Similar Questions", "similar_questions", false)
                    .description("Whether to return similar questions from your knowledge base"),
            ],
        )
        .with_default(json!({ "answer_mode": true }))
        .show_when("operation", &["search"]),
        // Last 30 days
        NodeProperty::string("Topic", "topic")
            .required()
            .show_when("operation", &["last30days"])
            .description("The topic to research (max 200 characters)")
            .placeholder("e.g., React Server Components"),
        NodeProperty::collection(
            "Options",
            "last30daysOptions",
            vec![
                NodeProperty::multi_options(
                    "Sources",
                    "sources",
                    vec![
                        PropertyOption::new("Reddit", "reddit"),
                        PropertyOption::new("Twitter/X", "twitter"),
                        PropertyOption::new("Web", "web"),
                    ],
                    vec!["twitter", "reddit", "web"],
                )
                .description("Data sources to query for research"),
                NodeProperty::number("Days", "days", 30)
                    .range(1.0, 30.0)
                    .description("Number of days to look back (1-30)"),
                NodeProperty::number("Max Results", "max_results", 20)
                    .range(5.0, 50.0)
                    .description("Maximum evidence items per source (5-50)"),
                NodeProperty::options(
                    "Output Format",
                    "output_format",
                    vec![
                        PropertyOption::new("Summary", "summary").description("Markdown-formatted narrative"),
                        PropertyOption::new("Bullets", "bullets").description("Structured bullet points"),
                        PropertyOption::new("JSON", "json").description("Fully structured data"),
                    ],
                    "summary",
                )
                .description("Response format for the research brief"),
            ],
        )
        .show_when("operation", &["last30days"]),
    ]
}
