//! End-to-end REST tests over the assembled router with a real in-memory
//! store and real signed tokens.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bt_api::AppState;
use bt_auth_jwt::JwtAuthProvider;
use bt_core::traits::AuthProvider;
use bt_db_sqlite::SqliteBugRepo;
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

async fn app() -> (Router, Arc<JwtAuthProvider>) {
    let repo = Arc::new(SqliteBugRepo::connect("sqlite::memory:").await.unwrap());
    let auth = Arc::new(JwtAuthProvider::new(SECRET));
    let state = AppState {
        repo,
        auth: auth.clone(),
    };
    (bt_api::router(state), auth)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_bug(app: &Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/bugs", Some(token), Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn create_returns_the_stored_record_with_defaults() {
    let (app, auth) = app().await;
    let token = auth.issue("testuser").unwrap();

    let bug = create_bug(
        &app,
        &token,
        serde_json::json!({"title": "Test Bug", "description": "d", "priority": "high"}),
    )
    .await;

    assert_eq!(bug["title"], "Test Bug");
    assert_eq!(bug["description"], "d");
    assert_eq!(bug["priority"], "high");
    assert_eq!(bug["status"], "open");
    assert_eq!(bug["createdBy"], "testuser");
    assert!(bug["id"].is_string());
    assert!(bug["createdAt"].is_string());
}

#[tokio::test]
async fn created_bug_round_trips_through_get() {
    let (app, auth) = app().await;
    let token = auth.issue("alice").unwrap();

    let created = create_bug(
        &app,
        &token,
        serde_json::json!({"title": "Round trip", "description": "fetch me back"}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/bugs/{}", created["id"].as_str().unwrap()),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    for field in ["title", "description", "priority", "status", "createdBy"] {
        assert_eq!(fetched[field], created[field], "field {field}");
    }
}

#[tokio::test]
async fn create_without_title_is_rejected_with_messages() {
    let (app, auth) = app().await;
    let token = auth.issue("alice").unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bugs",
            Some(&token),
            Some(serde_json::json!({"description": "d"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"],
        serde_json::json!(["Title is required"])
    );
}

#[tokio::test]
async fn listing_supports_status_filter() {
    let (app, auth) = app().await;
    let token = auth.issue("alice").unwrap();

    for i in 0..3 {
        create_bug(
            &app,
            &token,
            serde_json::json!({"title": format!("bug {i}"), "description": "d"}),
        )
        .await;
    }
    // Move one bug along the lifecycle so the filter has something to cut.
    let moved = create_bug(
        &app,
        &token,
        serde_json::json!({"title": "moving", "description": "d"}),
    )
    .await;
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/bugs/{}", moved["id"].as_str().unwrap()),
            Some(&token),
            Some(serde_json::json!({"status": "in-progress"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/bugs?status=in-progress", None, None))
        .await
        .unwrap();
    let bugs = body_json(response).await;
    assert_eq!(bugs.as_array().unwrap().len(), 1);
    assert_eq!(bugs[0]["title"], "moving");

    // Empty filter means unrestricted.
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/bugs?status=", None, None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn pagination_yields_disjoint_covering_pages() {
    let (app, auth) = app().await;
    let token = auth.issue("alice").unwrap();

    for i in 0..15 {
        create_bug(
            &app,
            &token,
            serde_json::json!({"title": format!("bug {i}"), "description": "d"}),
        )
        .await;
    }

    let page = |n: u32| {
        let app = app.clone();
        async move {
            let response = app
                .oneshot(json_request(
                    "GET",
                    &format!("/api/bugs?page={n}&limit=10"),
                    None,
                    None,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            body_json(response).await
        }
    };

    let page1 = page(1).await;
    let page2 = page(2).await;
    assert_eq!(page1.as_array().unwrap().len(), 10);
    assert_eq!(page2.as_array().unwrap().len(), 5);

    let mut ids: Vec<String> = page1
        .as_array()
        .unwrap()
        .iter()
        .chain(page2.as_array().unwrap())
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 15);
}

#[tokio::test]
async fn listing_an_empty_store_is_an_empty_array() {
    let (app, _) = app().await;
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/bugs", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn reopening_a_resolved_bug_is_rejected() {
    let (app, auth) = app().await;
    let token = auth.issue("alice").unwrap();

    let bug = create_bug(&app, &token, serde_json::json!({"title": "t", "description": "d"})).await;
    let uri = format!("/api/bugs/{}", bug["id"].as_str().unwrap());

    // open -> resolved is fine
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(&token),
            Some(serde_json::json!({"status": "resolved"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // resolved -> open is the one forbidden edge
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(&token),
            Some(serde_json::json!({"status": "open"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"],
        serde_json::json!(["Invalid status transition"])
    );
}

#[tokio::test]
async fn update_applies_only_supplied_fields() {
    let (app, auth) = app().await;
    let token = auth.issue("alice").unwrap();

    let bug = create_bug(
        &app,
        &token,
        serde_json::json!({"title": "original", "description": "d", "priority": "low"}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/bugs/{}", bug["id"].as_str().unwrap()),
            Some(&token),
            Some(serde_json::json!({"priority": "high"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["title"], "original");
    assert_eq!(updated["createdBy"], "alice");
    assert_eq!(updated["createdAt"], bug["createdAt"]);
}

#[tokio::test]
async fn deleting_twice_is_a_clean_404() {
    let (app, auth) = app().await;
    let token = auth.issue("alice").unwrap();

    let bug = create_bug(&app, &token, serde_json::json!({"title": "t", "description": "d"})).await;
    let uri = format!("/api/bugs/{}", bug["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Bug deleted");

    let response = app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_id_is_404_on_get() {
    let (app, _) = app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/bugs/{}", uuid::Uuid::now_v7()),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Bug not found");
}
