//! Wire-level tests against the full router, plus an end-to-end scenario
//! over a real listener using the client crate (so the envelopes on the wire
//! are genuinely sealed and opened).

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use harp_server::{router, AppState};
use harp_store::Store;

async fn test_app() -> Router {
    let store = Store::open_in_memory().await.expect("open in-memory store");
    router(AppState { store }, Duration::from_secs(5))
}

fn request(method: Method, uri: &str, auth: Option<(&str, &str)>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((username, password)) = auth {
        builder = builder.header("username", username).header("authorization", password);
    }
    match body {
        Some(v) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, username: &str, password: &str) {
    let res = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/user",
            None,
            Some(json!({ "username": username, "authorization": password })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_needs_no_auth() {
    let app = test_app().await;
    let res = app.oneshot(request(Method::GET, "/health", None, None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app().await;
    register(&app, "alice", "pw1").await;

    let res = app
        .oneshot(request(
            Method::POST,
            "/user",
            None,
            Some(json!({ "username": "alice", "authorization": "other" })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn guarded_routes_reject_missing_and_bad_credentials_identically() {
    let app = test_app().await;
    register(&app, "alice", "pw1").await;

    // No headers at all.
    let res = app
        .clone()
        .oneshot(request(Method::GET, "/projects", None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Wrong password.
    let res = app
        .clone()
        .oneshot(request(Method::GET, "/projects", Some(("alice", "wrong")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Unknown user — must look exactly like a wrong password.
    let res = app
        .oneshot(request(Method::GET, "/projects", Some(("mallory", "pw1")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn project_lifecycle_over_the_wire() {
    let app = test_app().await;
    register(&app, "alice", "pw1").await;
    let alice = Some(("alice", "pw1"));

    let res = app
        .clone()
        .oneshot(request(Method::PUT, "/projects/create/infra", alice, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Global project namespace: the same name conflicts even for the owner.
    let res = app
        .clone()
        .oneshot(request(Method::PUT, "/projects/create/infra", alice, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app
        .clone()
        .oneshot(request(Method::GET, "/projects", alice, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let projects = body_json(res).await;
    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(projects[0]["projectName"], "infra");
    let id = projects[0]["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(request(Method::GET, &format!("/projects/{id}"), alice, None))
        .await
        .unwrap();
    let lookup = body_json(res).await;
    assert_eq!(lookup["auth"], "alice");
    assert_eq!(lookup["project"]["projectName"], "infra");

    let res = app
        .clone()
        .oneshot(request(Method::DELETE, &format!("/projects/{id}"), alice, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(request(Method::GET, &format!("/projects/{id}"), alice, None))
        .await
        .unwrap();
    let lookup = body_json(res).await;
    assert!(lookup["project"].is_null());
}

#[tokio::test]
async fn key_write_list_delete_over_the_wire() {
    let app = test_app().await;
    register(&app, "alice", "pw1").await;
    let alice = Some(("alice", "pw1"));

    app.clone()
        .oneshot(request(Method::PUT, "/projects/create/infra", alice, None))
        .await
        .unwrap();
    let res = app
        .clone()
        .oneshot(request(Method::GET, "/projects", alice, None))
        .await
        .unwrap();
    let id = body_json(res).await[0]["id"].as_i64().unwrap();

    let envelope = "00112233445566778899aabbccddeeff0badc0de";
    let res = app
        .clone()
        .oneshot(request(
            Method::PUT,
            &format!("/projects/{id}/key"),
            alice,
            Some(json!({ "name": "API_KEY", "key": envelope })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(request(Method::GET, &format!("/projects/{id}/keys"), alice, None))
        .await
        .unwrap();
    let keys = body_json(res).await;
    assert_eq!(keys.as_array().unwrap().len(), 1);
    assert_eq!(keys[0]["name"], "API_KEY");
    assert_eq!(keys[0]["key"], envelope);

    let res = app
        .clone()
        .oneshot(request(
            Method::DELETE,
            &format!("/projects/{id}/key"),
            alice,
            Some(json!({ "name": "API_KEY" })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(request(Method::GET, &format!("/projects/{id}/keys"), alice, None))
        .await
        .unwrap();
    let keys = body_json(res).await;
    assert!(keys.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn tenants_cannot_observe_each_other() {
    let app = test_app().await;
    register(&app, "alice", "pw1").await;
    register(&app, "bob", "pw2").await;
    let alice = Some(("alice", "pw1"));
    let bob = Some(("bob", "pw2"));

    app.clone()
        .oneshot(request(Method::PUT, "/projects/create/secret-infra", alice, None))
        .await
        .unwrap();
    let res = app
        .clone()
        .oneshot(request(Method::GET, "/projects", alice, None))
        .await
        .unwrap();
    let id = body_json(res).await[0]["id"].as_i64().unwrap();

    // Bob guessing alice's valid numeric id gets a null project…
    let res = app
        .clone()
        .oneshot(request(Method::GET, &format!("/projects/{id}"), bob, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_json(res).await["project"].is_null());

    // …a 404 for its keys…
    let res = app
        .clone()
        .oneshot(request(Method::GET, &format!("/projects/{id}/keys"), bob, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // …and a 404 trying to delete it. Alice's project survives.
    let res = app
        .clone()
        .oneshot(request(Method::DELETE, &format!("/projects/{id}"), bob, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .oneshot(request(Method::GET, &format!("/projects/{id}"), alice, None))
        .await
        .unwrap();
    assert_eq!(body_json(res).await["project"]["projectName"], "secret-infra");
}

#[tokio::test]
async fn malformed_project_id_is_a_specific_client_error() {
    let app = test_app().await;
    register(&app, "alice", "pw1").await;

    let res = app
        .oneshot(request(
            Method::GET,
            "/projects/not-a-number",
            Some(("alice", "pw1")),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ── End to end through the client crate ──────────────────────────────────────

#[tokio::test]
async fn full_scenario_with_real_encryption() {
    let store = Store::open_in_memory().await.unwrap();
    let app = router(AppState { store }, Duration::from_secs(5));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let base_url = format!("http://{addr}");

    let salt = harp_crypto::kdf::generate_salt();
    let alice = harp_client::Session::connect(&base_url, "alice", "pw1", &salt)
        .await
        .unwrap();
    alice.register().await.unwrap();

    alice.create_project("infra").await.unwrap();
    let projects = alice.list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    let id = projects[0].id;

    alice.write_key(id, "API_KEY", "abc123").await.unwrap();

    // Server-side the stored value is an envelope, not the plaintext.
    let lookup = alice.get_project(id).await.unwrap();
    assert_eq!(lookup.auth, "alice");

    let keys = alice.keys(id).await.unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].name, "API_KEY");
    assert_eq!(keys[0].value.as_str(), "abc123");

    let env = alice.render_env(id).await.unwrap();
    assert_eq!(env.as_str(), "API_KEY=\"abc123\"");

    // Overwrite re-encrypts; the new value wins.
    alice.write_key(id, "API_KEY", "xyz789").await.unwrap();
    let keys = alice.keys(id).await.unwrap();
    assert_eq!(keys[0].value.as_str(), "xyz789");

    // A second tenant can authenticate but sees none of it.
    let bob_salt = harp_crypto::kdf::generate_salt();
    let bob = harp_client::Session::connect(&base_url, "bob", "pw2", &bob_salt)
        .await
        .unwrap();
    bob.register().await.unwrap();
    let lookup = bob.get_project(id).await.unwrap();
    assert!(lookup.project.is_none());
    assert!(matches!(
        bob.keys(id).await,
        Err(harp_client::ClientError::Api(_))
    ));

    alice.delete_project(id).await.unwrap();
    assert!(matches!(
        alice.keys(id).await,
        Err(harp_client::ClientError::Api(_))
    ));
}
