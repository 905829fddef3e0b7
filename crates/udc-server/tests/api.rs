//! HTTP API tests driven through the router with `tower::ServiceExt::oneshot`.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::sync::Arc;
use tower::ServiceExt;
use udc_assistant::{ChatDispatcher, ModelReply, ScriptedModel, ToolCall};
use udc_core::DataConfig;
use udc_policy::PolicySet;
use udc_runtime::{ConnectorRegistry, QueryExecutor};
use udc_server::{AppState, create_router};

struct Fixture {
    _dir: tempfile::TempDir,
    executor: Arc<QueryExecutor>,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("customers.json"),
        json!([
            {"name": "Customer_1000", "company": "Acme", "status": "active", "lifetime_value": 1000},
            {"name": "Customer_6000", "company": "Initech", "status": "active", "lifetime_value": 6000},
            {"name": "Customer_9000", "company": "Globex", "status": "inactive", "lifetime_value": 9000}
        ])
        .to_string(),
    )
    .unwrap();
    fs::write(
        dir.path().join("support_tickets.json"),
        json!([
            {"subject": "Login fails", "priority": "high", "status": "open"},
            {"subject": "Refund", "priority": "critical", "status": "closed"},
            {"subject": "Outage", "priority": "critical", "status": "in_progress"}
        ])
        .to_string(),
    )
    .unwrap();

    let data = DataConfig {
        directory: dir.path().to_path_buf(),
        ..DataConfig::default()
    };
    let executor = Arc::new(QueryExecutor::new(
        Arc::new(ConnectorRegistry::from_config(&data)),
        Arc::new(PolicySet::builtin()),
    ));
    Fixture { _dir: dir, executor }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_and_root() {
    let fx = fixture();
    let app = create_router(AppState::new(fx.executor.clone()));

    let (status, body) = send(app.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Universal Data Connector"));
}

#[tokio::test]
async fn data_endpoint_returns_voice_envelope() {
    let fx = fixture();
    let app = create_router(AppState::new(fx.executor.clone()));

    let (status, body) = send(app, get("/data/crm?lifetime_value__gt=5000&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([
            {"name": "Customer_9000", "company": "Globex", "lifetime_value": 9000},
            {"name": "Customer_6000", "company": "Initech", "lifetime_value": 6000}
        ])
    );
    assert_eq!(body["metadata"]["total_results"], 2);
    assert_eq!(body["metadata"]["returned_results"], 2);
    assert_eq!(body["metadata"]["freshness"], "real-time");
    assert_eq!(body["metadata"]["summary_hint"], "Use context field to generate concise answer.");
    assert_eq!(
        body["context"],
        "Top customer is Customer_9000 from Globex with lifetime value 9000. Showing 2 customers."
    );
}

#[tokio::test]
async fn data_endpoint_without_voice() {
    let fx = fixture();
    let app = create_router(AppState::new(fx.executor.clone()));

    let (status, body) = send(app, get("/data/support?voice_context=false")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["total_results"], 2);
    assert_eq!(body["data"][0]["subject"], "Outage");
    assert!(body["context"].is_null());
    assert!(body["metadata"]["summary_hint"].is_null());
}

#[tokio::test]
async fn data_endpoint_rejects_bad_input() {
    let fx = fixture();
    let app = create_router(AppState::new(fx.executor.clone()));

    for uri in ["/data/billing", "/data/crm?limit=0", "/data/crm?limit=51", "/data/crm?limit=abc", "/data/crm?offset=-1"] {
        let (status, body) = send(app.clone(), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["detail"].is_string(), "{}", uri);
    }

    let (_, body) = send(app, get("/data/billing")).await;
    assert_eq!(body["detail"], "Unsupported data source: billing");
}

#[tokio::test]
async fn chat_without_model_is_unavailable() {
    let fx = fixture();
    let app = create_router(AppState::new(fx.executor.clone()));

    let (status, body) = send(app, post_json("/chat", json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn chat_runs_one_tool_call() {
    let fx = fixture();
    let model = Arc::new(ScriptedModel::replying([
        ModelReply::tool_call(ToolCall::new("call_1", "query_data", r#"{"source": "support"}"#)),
        ModelReply::text("You have one critical ticket in progress."),
    ]));
    let state = AppState::new(fx.executor.clone())
        .with_dispatcher(ChatDispatcher::new(model.clone(), fx.executor.clone()));

    let (status, body) = send(
        create_router(state),
        post_json("/chat", json!({"message": "Any urgent tickets?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": "You have one critical ticket in progress."}));
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn chat_with_bad_tool_call_is_bad_gateway() {
    let fx = fixture();
    let model = Arc::new(ScriptedModel::replying([ModelReply::tool_call(ToolCall::new(
        "call_1",
        "drop_tables",
        "{}",
    ))]));
    let state = AppState::new(fx.executor.clone())
        .with_dispatcher(ChatDispatcher::new(model, fx.executor.clone()));

    let (status, _) = send(create_router(state), post_json("/chat", json!({"message": "q"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn chat_rejects_malformed_body() {
    let fx = fixture();
    let app = create_router(AppState::new(fx.executor.clone()));

    let (status, _) = send(app, post_json("/chat", json!({"text": "hi"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tools_listing_and_execution() {
    let fx = fixture();
    let app = create_router(AppState::new(fx.executor.clone()));

    let (status, body) = send(app.clone(), get("/tools")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "query_data");
    assert_eq!(body[0]["parameters"]["required"], json!(["source"]));

    let (status, body) = send(
        app.clone(),
        post_json("/tools/execute", json!({"name": "query_data", "arguments": {"source": "crm"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["returned_results"], 3);
    assert_eq!(body["data"][0]["lifetime_value"], 9000);
    assert!(body["context"].is_null());

    let (status, _) = send(
        app.clone(),
        post_json("/tools/execute", json!({"name": "nope", "arguments": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        app,
        post_json("/tools/execute", json!({"name": "query_data", "arguments": {"source": "crm", "limit": 99}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
