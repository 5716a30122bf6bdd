use std::fs;
use std::sync::Arc;

use api_rest::{build_router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
};
use serde_json::{json, Value};
use spots_core::{CoreConfig, SpotStore};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: axum::Router,
    store: Arc<SpotStore>,
    _temp: TempDir,
}

fn app() -> TestApp {
    let temp = TempDir::new().expect("temp dir should be created");
    let cfg = CoreConfig::new(temp.path().join("data").join("spots.json"))
        .expect("config should be valid");
    let store = Arc::new(SpotStore::new(Arc::new(cfg)));
    TestApp {
        router: build_router(AppState::new(store.clone())),
        store,
        _temp: temp,
    }
}

async fn send(app: &TestApp, request: Request<Body>) -> Response {
    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("response expected")
}

async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, Value::Null);
    }

    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

async fn send_json(app: &TestApp, method: Method, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build");
    read_json(send(app, request).await).await
}

async fn send_empty(app: &TestApp, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    read_json(send(app, request).await).await
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send_empty(&app, Method::GET, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn list_starts_empty() {
    let app = app();
    let (status, body) = send_empty(&app, Method::GET, "/api/spots").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "spots": [], "count": 0 }));
}

#[tokio::test]
async fn create_then_fetch_case_insensitively() {
    let app = app();

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/spots",
        json!({ "id": " west-lake ", "name": "West Lake", "tags": ["water"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "west-lake");

    let (status, fetched) = send_empty(&app, Method::GET, "/api/spots/WEST-LAKE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, listed) = send_empty(&app, Method::GET, "/api/spots").await;
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["spots"][0]["tags"], json!(["water"]));
}

#[tokio::test]
async fn create_requires_id_and_name() {
    let app = app();

    let (status, body) =
        send_json(&app, Method::POST, "/api/spots", json!({ "summary": "no keys" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Missing required fields", "fields": ["id", "name"] })
    );
}

#[tokio::test]
async fn create_with_blank_id_is_a_storage_rejection() {
    let app = app();

    let (status, body) =
        send_json(&app, Method::POST, "/api/spots", json!({ "id": "  ", "name": "Blank" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Spot record must include a non-empty 'id'.");
    assert!(app.store.list_spots().unwrap().is_empty());
}

#[tokio::test]
async fn non_json_content_type_is_unsupported() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/spots")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"id":"a","name":"A"}"#))
        .expect("request should build");

    let (status, body) = read_json(send(&app, request).await).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body, json!({ "error": "Expected 'application/json' request body" }));
}

#[tokio::test]
async fn non_object_body_is_malformed() {
    let app = app();

    let (status, body) = send_json(&app, Method::POST, "/api/spots", json!(["a", "b"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Malformed JSON body" }));
}

#[tokio::test]
async fn put_defaults_id_from_path_and_replaces_in_place() {
    let app = app();
    send_json(&app, Method::POST, "/api/spots", json!({ "id": "a", "name": "A" })).await;
    send_json(&app, Method::POST, "/api/spots", json!({ "id": "b", "name": "B" })).await;

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        "/api/spots/A",
        json!({ "name": "A2", "summary": "renamed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "name": "A2", "summary": "renamed", "id": "A" }));

    let (_, listed) = send_empty(&app, Method::GET, "/api/spots").await;
    assert_eq!(listed["count"], 2);
    assert_eq!(listed["spots"][0]["id"], "A");
    assert_eq!(listed["spots"][1]["id"], "b");
}

#[tokio::test]
async fn patch_is_a_full_overwrite() {
    let app = app();
    send_json(
        &app,
        Method::POST,
        "/api/spots",
        json!({ "id": "a", "name": "A", "location": "Hill" }),
    )
    .await;

    let (status, _) =
        send_json(&app, Method::PATCH, "/api/spots/a", json!({ "name": "A2" })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = send_empty(&app, Method::GET, "/api/spots/a").await;
    assert_eq!(fetched, json!({ "name": "A2", "id": "a" }));
}

#[tokio::test]
async fn missing_spot_returns_not_found_body() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/api/spots/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Spot not found", "spot_id": "ghost" }));

    let (status, body) = send_empty(&app, Method::DELETE, "/api/spots/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Spot not found", "spot_id": "ghost" }));
}

#[tokio::test]
async fn delete_removes_spot_with_empty_body() {
    let app = app();
    send_json(&app, Method::POST, "/api/spots", json!({ "id": "a", "name": "A" })).await;

    let (status, body) = send_empty(&app, Method::DELETE, "/api/spots/A").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, listed) = send_empty(&app, Method::GET, "/api/spots").await;
    assert_eq!(listed["count"], 0);
}

#[tokio::test]
async fn options_requests_get_no_content_with_cors_headers() {
    let app = app();

    for uri in ["/api/spots", "/api/spots/anything"] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .body(Body::empty())
            .expect("request should build");
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(
            headers["access-control-allow-methods"],
            "GET,POST,PUT,DELETE,OPTIONS"
        );
    }
}

#[tokio::test]
async fn cors_headers_are_added_to_error_responses() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/spots/ghost")
        .body(Body::empty())
        .expect("request should build");

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn corrupt_document_fails_reads_and_rejects_writes() {
    let app = app();
    let path = app.store.data_file().to_path_buf();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();

    let (status, body) = send_empty(&app, Method::GET, "/api/spots").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to decode JSON data"));

    let (status, _) =
        send_json(&app, Method::POST, "/api/spots", json!({ "id": "a", "name": "A" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
}

#[tokio::test]
async fn openapi_document_lists_spot_paths() {
    let app = app();
    let (status, doc) = send_empty(&app, Method::GET, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/spots"].is_object());
    assert!(doc["paths"]["/api/spots/{spot_id}"]["delete"].is_object());
    assert!(doc["paths"]["/api/spots/{spot_id}"]["put"].is_object());
    assert!(doc["paths"]["/api/spots/{spot_id}"]["patch"].is_object());
}
