//! Public read surface: listing, single fetch, health and the JSON 404s.

mod common;

use axum::http::{Method, StatusCode};
use common::{article, TestApp};
use serde_json::json;

#[tokio::test]
async fn seeded_list_is_newest_first() {
    let app = TestApp::seeded();

    let response = app.get("/api/posts").await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<i64> = response
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(
        response.body[0]["title"],
        "Ganesh Chaturthi: The Festival of New Beginnings"
    );
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let app = TestApp::empty();

    let response = app.get("/api/posts").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn created_post_reads_back_with_stored_field_names() {
    let app = TestApp::empty();
    let created = app
        .create(json!({
            "title": "  Diwali Lakshmi Puja  ",
            "subtitle": "",
            "content": "<p>Lamps</p>",
            "tags": "Diwali, Lakshmi",
            "featuredImage": "https://cdn.example/diya.jpg",
        }))
        .await;

    let id = created["id"].as_i64().expect("id");
    let fetched = app.get(&format!("/api/posts/{id}")).await;

    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created);
    assert_eq!(fetched.body["title"], "Diwali Lakshmi Puja");
    assert_eq!(fetched.body["subtitle"], json!(null));
    assert_eq!(fetched.body["links"], json!(null));
    assert_eq!(fetched.body["tags"], "Diwali, Lakshmi");
    assert_eq!(fetched.body["featured_image"], "https://cdn.example/diya.jpg");
    assert_eq!(fetched.body["created_at"], fetched.body["updated_at"]);
}

#[tokio::test]
async fn reads_are_idempotent() {
    let app = TestApp::seeded();

    let first = app.get("/api/posts/2").await;
    let second = app.get("/api/posts/2").await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn newer_posts_come_first() {
    let app = TestApp::seeded();
    let created = app.create(article("Navratri")).await;

    let list = app.get("/api/posts").await;

    assert_eq!(list.body[0], created);
    assert_eq!(list.body.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn missing_and_non_numeric_ids_are_not_found() {
    let app = TestApp::seeded();

    for uri in ["/api/posts/999", "/api/posts/abc", "/api/posts/1.5"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response.body, json!({ "error": "Post not found" }), "{uri}");
    }
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = TestApp::seeded();

    let response = app.get("/api/nothing-here").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    insta::assert_snapshot!(response.body.to_string(), @r#"{"error":"Route not found"}"#);
}

#[tokio::test]
async fn paths_outside_api_are_json_404() {
    let app = TestApp::seeded();

    let response = app.get("/posts").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "Route not found" }));
}

#[tokio::test]
async fn wrong_method_on_known_path_is_json_404() {
    let app = TestApp::seeded();

    let response = app.json(Method::DELETE, "/api/posts/1", &json!({})).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "Route not found" }));
}

#[tokio::test]
async fn health_reports_status_and_storage() {
    let app = TestApp::empty();

    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "OK");
    assert_eq!(response.body["storage"], "fallback");
    let stamp = response.body["timestamp"].as_str().expect("timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "{stamp}");
    assert!(stamp.ends_with('Z'));
}

#[tokio::test]
async fn blank_optional_fields_read_back_as_null() {
    let app = TestApp::empty();
    let created = app
        .create(json!({
            "title": "A",
            "content": "<p>B</p>",
            "tags": "x, y",
            "links": "",
            "featuredImage": "",
        }))
        .await;

    let fetched = app
        .get(&format!("/api/posts/{}", created["id"]))
        .await
        .body;

    assert_eq!(fetched["subtitle"], json!(null));
    assert_eq!(fetched["tags"], "x, y");
    assert_eq!(fetched["links"], json!(null));
    assert_eq!(fetched["featured_image"], json!(null));
}
