/// Integration tests for the TaskDeck API
///
/// These tests verify the full system works end-to-end:
/// - Registration and Basic auth credential verification
/// - Task lifecycle (create → complete/cancel → delete)
/// - Ownership scoping across accounts
/// - Filtered listing (tag, status, search)
/// - Comments on owned tasks
/// - The tag/status projection
///
/// They require a PostgreSQL database via DATABASE_URL and skip themselves
/// when it is unset.
mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;
use tower::Service as _;

/// Test that registration works and credentials gate the protected routes
#[tokio::test]
async fn test_register_and_authenticate() {
    let Some(ctx) = TestContext::new().await else { return };

    let name = common::unique("alice");
    let email = format!("{}@example.com", name);

    // Register
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "username": name,
                "email": email,
                "password": "hunter2"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["meta"]["code"], 200);
    assert_eq!(body["meta"]["error"], false);

    let items = body["payload"]["items"].as_object().unwrap();
    let user_id = items["id"].as_i64().unwrap();
    assert_eq!(items["email"], json!(email));
    // The stored hash never leaves the server
    assert!(!items.contains_key("password_hash"));

    // Correct credentials reach the protected route
    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", common::basic_auth(&email, "hunter2"))
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["payload"]["items"]["id"].as_i64(), Some(user_id));

    // Wrong password is rejected
    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", common::basic_auth(&email, "wrong"))
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Missing header is a malformed request, not an auth failure
    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // So is a non-Basic scheme
    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", "Bearer xyz")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    common::remove_user(&ctx.db, user_id).await;
}

/// Test the full task lifecycle through the HTTP surface
#[tokio::test]
async fn test_task_lifecycle_end_to_end() {
    let Some(ctx) = TestContext::new().await else { return };
    let owner = common::register_user(&ctx, "owner").await;

    // Create a task; it starts in "new"
    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("authorization", owner.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({"title": "Buy milk"}).to_string()))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["payload"]["items"]["status"], "new");
    assert_eq!(body["payload"]["items"]["title"], "Buy milk");
    let task_id = body["payload"]["items"]["id"].as_i64().unwrap();

    // Complete it
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/tasks/complete/{}", task_id))
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["payload"]["items"]["status"], "completed");

    // The status filter finds it
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks?status=completed")
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let body = common::response_json(response).await;
    let found = body["payload"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["id"].as_i64() == Some(task_id));
    assert!(found, "completed task should appear in the filtered list");

    // Another account cannot delete it
    let stranger = common::register_user(&ctx, "stranger").await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/tasks/{}", task_id))
        .header("authorization", stranger.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner can
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/tasks/{}", task_id))
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // And the list no longer carries it
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks")
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let body = common::response_json(response).await;
    assert!(body["payload"]["items"].as_array().unwrap().is_empty());

    common::remove_user(&ctx.db, owner.id).await;
    common::remove_user(&ctx.db, stranger.id).await;
}

/// Test that completing and canceling overwrite each other
#[tokio::test]
async fn test_complete_then_cancel_overwrites() {
    let Some(ctx) = TestContext::new().await else { return };
    let owner = common::register_user(&ctx, "flipper").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("authorization", owner.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({"title": "Flip flop"}).to_string()))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let body = common::response_json(response).await;
    let task_id = body["payload"]["items"]["id"].as_i64().unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/tasks/complete/{}", task_id))
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();
    ctx.app.clone().call(request).await.unwrap();

    // Canceling a completed task succeeds; last write wins
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/tasks/cancel/{}", task_id))
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["payload"]["items"]["status"], "cancel");

    // And the stored row agrees
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/tasks/{}", task_id))
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let body = common::response_json(response).await;
    assert_eq!(body["payload"]["items"]["status"], "cancel");

    common::remove_user(&ctx.db, owner.id).await;
}

/// Test that an empty title is rejected with the failure envelope
#[tokio::test]
async fn test_create_task_requires_title() {
    let Some(ctx) = TestContext::new().await else { return };
    let owner = common::register_user(&ctx, "untitled").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("authorization", owner.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({"title": ""}).to_string()))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::response_json(response).await;
    assert_eq!(body["meta"]["code"], 400);
    assert_eq!(body["meta"]["error"], true);
    assert!(body.get("payload").is_none());

    common::remove_user(&ctx.db, owner.id).await;
}

/// Test that comments require owning the task and deleting requires authorship
#[tokio::test]
async fn test_comments_are_owner_scoped() {
    let Some(ctx) = TestContext::new().await else { return };
    let owner = common::register_user(&ctx, "author").await;
    let stranger = common::register_user(&ctx, "lurker").await;

    // Owner creates a task
    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("authorization", owner.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(json!({"title": "Discussed"}).to_string()))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let body = common::response_json(response).await;
    let task_id = body["payload"]["items"]["id"].as_i64().unwrap();

    // A stranger cannot comment on it
    let request = Request::builder()
        .method("POST")
        .uri("/api/comments")
        .header("authorization", stranger.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"content": "drive-by", "task_id": task_id}).to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner can
    let request = Request::builder()
        .method("POST")
        .uri("/api/comments")
        .header("authorization", owner.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"content": "first!", "task_id": task_id}).to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["payload"]["items"]["content"], "first!");
    let comment_id = body["payload"]["items"]["id"].as_i64().unwrap();

    // Deletion is scoped to the comment's author
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/comments/{}", comment_id))
        .header("authorization", stranger.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/comments/{}", comment_id))
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    common::remove_user(&ctx.db, owner.id).await;
    common::remove_user(&ctx.db, stranger.id).await;
}

/// Test that updates replace description and tags but leave the title alone
#[tokio::test]
async fn test_update_changes_description_and_tags() {
    let Some(ctx) = TestContext::new().await else { return };
    let owner = common::register_user(&ctx, "editor").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("authorization", owner.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "title": "Original",
                "description": "old words",
                "tags": ["stale"]
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let body = common::response_json(response).await;
    let task_id = body["payload"]["items"]["id"].as_i64().unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri("/api/tasks")
        .header("authorization", owner.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "id": task_id,
                "description": "new words",
                "tags": ["fresh"]
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["payload"]["items"]["title"], "Original");
    assert_eq!(body["payload"]["items"]["description"], "new words");
    assert_eq!(body["payload"]["items"]["tags"], json!(["fresh"]));

    common::remove_user(&ctx.db, owner.id).await;
}

/// Test the three filter branches and their precedence over the query string
#[tokio::test]
async fn test_list_filter_modes() {
    let Some(ctx) = TestContext::new().await else { return };
    let owner = common::register_user(&ctx, "filterer").await;

    let create = |body: serde_json::Value| {
        Request::builder()
            .method("POST")
            .uri("/api/tasks")
            .header("authorization", owner.auth_header())
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let response = ctx
        .app
        .clone()
        .call(create(json!({"title": "Clean kitchen", "tags": ["home"]})))
        .await
        .unwrap();
    let tagged_id = common::response_json(response).await["payload"]["items"]["id"]
        .as_i64()
        .unwrap();

    let response = ctx
        .app
        .clone()
        .call(create(
            json!({"title": "Shopping", "description": "pick up cheese and bread"}),
        ))
        .await
        .unwrap();
    let searched_id = common::response_json(response).await["payload"]["items"]["id"]
        .as_i64()
        .unwrap();

    let response = ctx
        .app
        .clone()
        .call(create(json!({"title": "Done already"})))
        .await
        .unwrap();
    let completed_id = common::response_json(response).await["payload"]["items"]["id"]
        .as_i64()
        .unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/tasks/complete/{}", completed_id))
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();
    ctx.app.clone().call(request).await.unwrap();

    let list_ids = |body: serde_json::Value| -> Vec<i64> {
        body["payload"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect()
    };

    // Tag filter is case-insensitive on input
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks?tag=HOME")
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(list_ids(common::response_json(response).await), vec![tagged_id]);

    // Status filter
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks?status=completed")
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(
        list_ids(common::response_json(response).await),
        vec![completed_id]
    );

    // Free-text search over descriptions
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks?search=cheese")
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(
        list_ids(common::response_json(response).await),
        vec![searched_id]
    );

    // Tag wins when both tag and search are present
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks?tag=home&search=cheese")
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(list_ids(common::response_json(response).await), vec![tagged_id]);

    common::remove_user(&ctx.db, owner.id).await;
}

/// Test the tag/status projection expands tags against the display name
#[tokio::test]
async fn test_tagstatus_projection() {
    let Some(ctx) = TestContext::new().await else { return };
    let owner = common::register_user(&ctx, "reporter").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("authorization", owner.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"title": "Tagged twice", "tags": ["home", "urgent"]}).to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let task_id = common::response_json(response).await["payload"]["items"]["id"]
        .as_i64()
        .unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/tasks/complete/{}", task_id))
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();
    ctx.app.clone().call(request).await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/tagstatus")
        .header("authorization", owner.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    let mut pairs: Vec<(String, String)> = body["payload"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["tag"].as_str().unwrap().to_string(),
                p["status"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    pairs.sort();

    assert_eq!(
        pairs,
        vec![
            ("home".to_string(), "Completed".to_string()),
            ("urgent".to_string(), "Completed".to_string()),
        ]
    );

    common::remove_user(&ctx.db, owner.id).await;
}

/// Test the health endpoint answers without credentials
#[tokio::test]
async fn test_health_endpoint() {
    let Some(ctx) = TestContext::new().await else { return };

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Security headers ride on every response
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );

    let body = common::response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
    assert!(body["version"].as_str().is_some_and(|v| !v.is_empty()));
}
