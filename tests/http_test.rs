mod helpers;

use carnet::settings::Settings;
use carnet::web;
use helpers::TestApp;
use serde_json::{json, Value};
use std::net::SocketAddr;

/// Serve the application on an ephemeral port and return its address
async fn spawn(app: &TestApp, graphiql: bool) -> SocketAddr {
    let mut settings = Settings::default();
    settings.server.graphiql = graphiql;
    let router = web::app(&settings, app.schema.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });
    addr
}

#[tokio::test]
async fn test_post_graphql_with_bearer_header() {
    let app = TestApp::new();
    let addr = spawn(&app, true).await;
    let token = app.token_for("2");

    let body: Value = reqwest::Client::new()
        .post(format!("http://{addr}/graphql"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "query": "{ user(id: \"2\") { name statut } }" }))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Response is not JSON");

    assert_eq!(
        body,
        json!({ "data": { "user": { "name": "Tom", "statut": "admin" } } })
    );
}

#[tokio::test]
async fn test_bare_token_without_prefix_is_accepted() {
    let app = TestApp::new();
    let addr = spawn(&app, true).await;
    let token = app.token_for("0");

    let body: Value = reqwest::Client::new()
        .post(format!("http://{addr}/graphql"))
        .header("Authorization", token)
        .json(&json!({ "query": "{ posts { id } }" }))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Response is not JSON");

    assert_eq!(body["data"]["posts"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_missing_header_reports_unauthenticated() {
    let app = TestApp::new();
    let addr = spawn(&app, true).await;

    let body: Value = reqwest::Client::new()
        .post(format!("http://{addr}/graphql"))
        .json(&json!({ "query": "{ users { id } }" }))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Response is not JSON");

    assert_eq!(body["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_get_graphql_with_query_string() {
    let app = TestApp::new();
    let addr = spawn(&app, true).await;
    let token = app.token_for("1");

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/graphql"))
        .bearer_auth(token)
        .query(&[("query", "{ projet(id: \"0\") { title } }")])
        .send()
        .await
        .expect("Request failed");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Response is not JSON");
    assert_eq!(body, json!({ "data": { "projet": { "title": "Projet 1" } } }));
}

#[tokio::test]
async fn test_healthz_sets_security_headers() {
    let app = TestApp::new();
    let addr = spawn(&app, true).await;

    let response = reqwest::get(format!("http://{addr}/healthz"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers().get("x-frame-options").map(|v| v.as_bytes()),
        Some(&b"DENY"[..])
    );
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .map(|v| v.as_bytes()),
        Some(&b"nosniff"[..])
    );
    assert_eq!(response.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
async fn test_graphiql_toggle() {
    let app = TestApp::new();

    let enabled = spawn(&app, true).await;
    let response = reqwest::get(format!("http://{enabled}/graphiql"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let page = response.text().await.expect("Failed to read body");
    assert!(page.contains("/graphql"));

    let disabled = spawn(&app, false).await;
    let response = reqwest::get(format!("http://{disabled}/graphiql"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
