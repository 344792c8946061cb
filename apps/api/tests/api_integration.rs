//! End-to-end API integration tests
//!
//! These tests drive the full router in-process:
//! - Catalog listing and lookup
//! - Rendering with defaults and missing required fields
//! - AI fill through the provider chain and the merge policy
//! - Error mapping to `{"error": ...}` bodies

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use promptdeck_api::api::{router, AiStatus, AppState};
use promptdeck_api::config::AiConfig;
use promptdeck_api::domain::library::TemplateLibrary;
use promptdeck_api::suggestions::{
    HeuristicProvider, ProviderChain, SuggestionError, SuggestionProvider, SuggestionRequest,
    SuggestionResult, Suggestions,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for oneshot

const DATASET: &str = r#"{
    "version": "test",
    "categories": [
        {
            "id": "writing",
            "name": "Writing",
            "description": "Text tasks",
            "templates": [{
                "id": "explain",
                "name": "Explain",
                "short_description": "Explain a concept",
                "prompt_template": "Explain {{topic}} to {{ audience }} at {{level}} level",
                "placeholders": [
                    {"key": "topic", "label": "Topic", "type": "string", "required": true, "ai_fill": true},
                    {"key": "audience", "label": "Audience", "type": "string", "required": true, "default": "beginners"},
                    {"key": "level", "label": "Level", "type": "enum", "enum_options": ["intro", "expert"]}
                ],
                "tags": ["education"],
                "example_inputs": [{"name": "ex", "placeholder_values": {"topic": "entropy"}}]
            }]
        },
        {
            "id": "image",
            "name": "Image",
            "templates": [{
                "id": "product-shot",
                "name": "Product shot",
                "prompt_template": "Photo of {{product}}",
                "placeholders": [{"key": "product", "type": "string", "required": true}]
            }]
        }
    ]
}"#;

struct Unavailable;

#[async_trait]
impl SuggestionProvider for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn suggest(&self, _request: &SuggestionRequest<'_>) -> SuggestionResult<Suggestions> {
        Err(SuggestionError::LlmError("connection refused".to_string()))
    }
}

/// Setup test application around the fixture catalog
fn setup_app(suggester: Arc<dyn SuggestionProvider>) -> Router {
    let library = TemplateLibrary::from_json_str(DATASET).expect("fixture dataset is valid");
    let state = AppState::new(library, suggester, AiStatus::from(&AiConfig::default()));
    router(state)
}

fn heuristic_app() -> Router {
    setup_app(Arc::new(
        ProviderChain::new().with(Arc::new(HeuristicProvider::new())),
    ))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let response = heuristic_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_config_reports_unconfigured_ai() {
    let (status, json) = get_json(heuristic_app(), "/api/config").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["configured"], false);
    assert_eq!(json["model"], "gpt-4o-mini");
    assert!(json.get("api_key").is_none());
}

#[tokio::test]
async fn test_list_categories() {
    let (status, json) = get_json(heuristic_app(), "/api/templates/categories").await;

    assert_eq!(status, StatusCode::OK);
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["id"], "writing");
    assert_eq!(categories[0]["template_count"], 1);
    assert_eq!(categories[0]["description"], "Text tasks");
    assert_eq!(categories[1]["id"], "image");
}

#[tokio::test]
async fn test_list_templates_all_and_by_category() {
    let (_, all) = get_json(heuristic_app(), "/api/templates").await;
    assert_eq!(all["templates"].as_array().unwrap().len(), 2);

    let (status, filtered) = get_json(heuristic_app(), "/api/templates?category=image").await;
    assert_eq!(status, StatusCode::OK);
    let templates = filtered["templates"].as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["id"], "product-shot");
    assert_eq!(templates[0]["category_id"], "image");

    let (status, unknown) = get_json(heuristic_app(), "/api/templates?category=nope").await;
    assert_eq!(status, StatusCode::OK);
    assert!(unknown["templates"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_template() {
    let (status, json) = get_json(heuristic_app(), "/api/templates/explain").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "explain");
    assert_eq!(json["category_id"], "writing");
    assert_eq!(json["placeholders"][0]["key"], "topic");
    assert_eq!(json["placeholders"][0]["type"], "string");
    assert_eq!(json["tags"][0], "education");
}

#[tokio::test]
async fn test_get_unknown_template_is_404() {
    let (status, json) = get_json(heuristic_app(), "/api/templates/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_render_reports_missing_required() {
    let (status, json) = post_json(
        heuristic_app(),
        "/api/templates/explain/render",
        json!({ "placeholderValues": { "audience": "" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["rendered_prompt"],
        "Explain {{topic}} to beginners at {{level}} level"
    );
    assert_eq!(json["missing_required"], json!(["topic"]));
}

#[tokio::test]
async fn test_render_complete() {
    let (status, json) = post_json(
        heuristic_app(),
        "/api/templates/explain/render",
        json!({ "placeholderValues": { "topic": "tides", "audience": "sailors", "level": "expert", "stray": 1 } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rendered_prompt"], "Explain tides to sailors at expert level");
    assert_eq!(json["missing_required"], json!([]));
}

#[tokio::test]
async fn test_render_accepts_empty_object() {
    let (status, json) = post_json(heuristic_app(), "/api/templates/product-shot/render", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rendered_prompt"], "Photo of {{product}}");
    assert_eq!(json["missing_required"], json!(["product"]));
}

#[tokio::test]
async fn test_render_rejects_malformed_body() {
    let response = heuristic_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/templates/explain/render")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_render_unknown_template_is_404() {
    let (status, _) = post_json(
        heuristic_app(),
        "/api/templates/missing/render",
        json!({ "placeholderValues": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ai_fill_fills_empty_slots() {
    let (status, json) = post_json(
        heuristic_app(),
        "/api/templates/explain/ai-fill",
        json!({ "placeholderValues": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["suggested_values"]["topic"], "entropy");
    assert_eq!(json["suggested_values"]["audience"], "beginners");
    assert_eq!(json["suggested_values"]["level"], "intro");
    assert_eq!(json["placeholder_values"]["topic"], "entropy");
    assert_eq!(
        json["rendered_prompt"],
        "Explain entropy to beginners at intro level"
    );
    assert_eq!(json["missing_required"], json!([]));
    assert!(json["reasoning"].is_string());
}

#[tokio::test]
async fn test_ai_fill_keeps_user_values() {
    let (status, json) = post_json(
        heuristic_app(),
        "/api/templates/explain/ai-fill",
        json!({ "placeholderValues": { "topic": "gravity" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["suggested_values"].get("topic").is_none());
    assert_eq!(json["placeholder_values"]["topic"], "gravity");
    assert_eq!(
        json["rendered_prompt"],
        "Explain gravity to beginners at intro level"
    );
}

#[tokio::test]
async fn test_ai_fill_target_key_overwrites_only_target() {
    let (status, json) = post_json(
        heuristic_app(),
        "/api/templates/explain/ai-fill",
        json!({ "placeholderValues": { "topic": "gravity" }, "target_key": "topic" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["suggested_values"], json!({ "topic": "entropy" }));
    assert_eq!(json["placeholder_values"], json!({ "topic": "entropy" }));
    assert_eq!(
        json["rendered_prompt"],
        "Explain entropy to beginners at {{level}} level"
    );
}

#[tokio::test]
async fn test_ai_fill_unknown_target_is_400() {
    let (status, json) = post_json(
        heuristic_app(),
        "/api/templates/explain/ai-fill",
        json!({ "placeholderValues": {}, "target_key": "nope" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_ai_fill_falls_back_to_heuristic() {
    let chain = ProviderChain::new()
        .with(Arc::new(Unavailable))
        .with(Arc::new(HeuristicProvider::new()));
    let (status, json) = post_json(
        setup_app(Arc::new(chain)),
        "/api/templates/product-shot/ai-fill",
        json!({ "placeholderValues": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["reasoning"]
        .as_str()
        .unwrap()
        .contains("unavailable failed"));
}

#[tokio::test]
async fn test_ai_fill_all_providers_failing_is_502() {
    let chain = ProviderChain::new().with(Arc::new(Unavailable));
    let (status, json) = post_json(
        setup_app(Arc::new(chain)),
        "/api/templates/explain/ai-fill",
        json!({ "placeholderValues": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}
