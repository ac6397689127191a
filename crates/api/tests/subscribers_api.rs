//! HTTP-level tests for subscribing, unsubscribing and newsletter sends.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, build_test_app_with_mailer, get, RecordingMailer, TestRequest};
use codetimes_db::repositories::{BlogPostRepo, SubscriberRepo};
use sqlx::PgPool;

async fn subscribe(app: axum::Router, email: &str, interests: &[&str]) -> axum::http::Response<axum::body::Body> {
    TestRequest::new(Method::POST, "/api/v1/subscribers")
        .json(
            app,
            serde_json::json!({"email": email, "interests": interests}),
        )
        .await
}

/// The welcome email is sent from a background task.
async fn wait_for_mail(mailer: &RecordingMailer, count: usize) {
    for _ in 0..50 {
        if mailer.sent.lock().unwrap().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected {count} emails to be sent");
}

// ---------------------------------------------------------------------------
// Subscribe
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_sends_welcome_with_unsubscribe_link(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = build_test_app_with_mailer(pool.clone(), Some(mailer.clone()));

    let response = subscribe(app, " Reader@Example.com ", &["Blog"]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "reader@example.com");
    assert_eq!(json["data"]["name"], "Anonymous");
    assert!(json["data"].get("unsubscribeToken").is_none());

    wait_for_mail(&mailer, 1).await;
    let stored = SubscriberRepo::find_by_email(&pool, "reader@example.com")
        .await
        .unwrap()
        .unwrap();
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent[0].to, vec!["reader@example.com".to_string()]);
    assert!(sent[0]
        .html
        .contains(&format!("/unsubscribe?t={}", stored.unsubscribe_token)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_active_duplicate_conflicts(pool: PgPool) {
    let app = build_test_app(pool);

    let response = subscribe(app.clone(), "a@example.com", &["Blog"]).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = subscribe(app, "A@example.com", &["Teaching"]).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_subscribe_validation(pool: PgPool) {
    let app = build_test_app(pool);

    let response = subscribe(app.clone(), "not-an-email", &["Blog"]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = subscribe(app.clone(), "a@example.com", &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = subscribe(app, "a@example.com", &["Poetry"]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_manages_subscribers(pool: PgPool) {
    let app = build_test_app(pool);
    let created = body_json(subscribe(app.clone(), "a@example.com", &["Blog"]).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = TestRequest::new(Method::GET, "/api/v1/subscribers").send(app.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(
        TestRequest::new(Method::GET, "/api/v1/subscribers")
            .admin()
            .send(app.clone())
            .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = TestRequest::new(Method::PUT, &format!("/api/v1/subscribers/{id}"))
        .admin()
        .json(
            app.clone(),
            serde_json::json!({"name": "Ada", "interests": ["Blog", "Teaching"]}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Ada");
    assert_eq!(json["data"]["interests"], serde_json::json!(["Blog", "Teaching"]));

    let response = TestRequest::new(Method::DELETE, &format!("/api/v1/subscribers/{id}"))
        .admin()
        .send(app.clone())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = TestRequest::new(Method::DELETE, &format!("/api/v1/subscribers/{id}"))
        .admin()
        .send(app)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Unsubscribe
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unsubscribe_by_token(pool: PgPool) {
    let app = build_test_app(pool.clone());
    subscribe(app.clone(), "a@example.com", &["Blog"]).await;
    let token = SubscriberRepo::find_by_email(&pool, "a@example.com")
        .await
        .unwrap()
        .unwrap()
        .unsubscribe_token;

    let response = get(app.clone(), "/api/v1/unsubscribe").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Token required");

    let response = get(app.clone(), "/api/v1/unsubscribe?t=unknown").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app.clone(), &format!("/api/v1/unsubscribe?t={token}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["message"], "You have been unsubscribed.");

    let stored = SubscriberRepo::find_by_email(&pool, "a@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_active());
    assert!(stored.interests.is_empty());

    // Resubscribing an unsubscribed email is allowed.
    let response = subscribe(app, "a@example.com", &["Teaching"]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unsubscribe_by_email_messages(pool: PgPool) {
    let app = build_test_app(pool);
    subscribe(app.clone(), "a@example.com", &["Blog"]).await;

    let response = TestRequest::new(Method::POST, "/api/v1/unsubscribe")
        .json(app.clone(), serde_json::json!({"email": " A@Example.com "}))
        .await;
    assert_eq!(body_json(response).await["message"], "You have been unsubscribed.");

    let response = TestRequest::new(Method::POST, "/api/v1/unsubscribe")
        .json(app.clone(), serde_json::json!({"email": "nobody@example.com"}))
        .await;
    assert_eq!(body_json(response).await["message"], "This email was not subscribed.");

    let response = TestRequest::new(Method::POST, "/api/v1/unsubscribe")
        .json(app, serde_json::json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Digest and notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_digest_goes_to_matching_audience(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = build_test_app_with_mailer(pool, Some(mailer.clone()));

    subscribe(app.clone(), "blog@example.com", &["Blog"]).await;
    subscribe(app.clone(), "teach@example.com", &["Teaching"]).await;
    wait_for_mail(&mailer, 2).await;
    mailer.sent.lock().unwrap().clear();

    let post = body_json(
        TestRequest::new(Method::POST, "/api/v1/blog")
            .admin()
            .json(
                app.clone(),
                serde_json::json!({
                    "title": "Semicolons <3",
                    "summary": "s",
                    "content": "c",
                    "image": "https://utfs.io/f/x.jpg",
                }),
            )
            .await,
    )
    .await;
    let post_id = post["data"]["id"].as_i64().unwrap();

    let response = TestRequest::new(Method::POST, "/api/v1/email/digest")
        .admin()
        .json(
            app.clone(),
            serde_json::json!({
                "subject": "This week",
                "introMessage": "Hello readers",
                "periodLabel": "Week of Sep 1",
                "interests": ["Blog"],
                "blogIds": [post_id],
                "teachingIds": [],
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["sent"], 1);
    assert_eq!(json["skipped"], false);

    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bcc, vec!["blog@example.com".to_string()]);
    assert!(sent[0].html.contains("Semicolons &lt;3"));
    assert!(sent[0]
        .html
        .contains(&format!("https://drcodezenna.com/blog/{post_id}")));

    let response = TestRequest::new(Method::POST, "/api/v1/email/digest")
        .admin()
        .json(
            app,
            serde_json::json!({
                "subject": "",
                "introMessage": "Hello",
                "interests": ["Blog"],
                "blogIds": [post_id],
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Subject is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notify_marks_posts_and_skips_when_disabled(pool: PgPool) {
    let disabled = build_test_app(pool.clone());
    subscribe(disabled.clone(), "blog@example.com", &["Blog"]).await;
    TestRequest::new(Method::POST, "/api/v1/blog")
        .admin()
        .json(
            disabled.clone(),
            serde_json::json!({
                "title": "Pending",
                "summary": "s",
                "content": "c",
                "image": "https://utfs.io/f/x.jpg",
            }),
        )
        .await;

    let json = body_json(
        TestRequest::new(Method::POST, "/api/v1/notify/blog")
            .admin()
            .send(disabled)
            .await,
    )
    .await;
    assert_eq!(json["data"]["skipped"], true);
    assert_eq!(BlogPostRepo::list_unnotified(&pool).await.unwrap().len(), 1);

    let mailer = Arc::new(RecordingMailer::default());
    let enabled = build_test_app_with_mailer(pool.clone(), Some(mailer.clone()));
    let json = body_json(
        TestRequest::new(Method::POST, "/api/v1/notify/blog")
            .admin()
            .send(enabled)
            .await,
    )
    .await;
    assert_eq!(json["data"]["notified"], 1);
    assert_eq!(json["data"]["recipients"], 1);
    assert!(BlogPostRepo::list_unnotified(&pool).await.unwrap().is_empty());
    assert!(mailer.sent.lock().unwrap()[0].subject.starts_with("New Blog Post: Pending"));
}
