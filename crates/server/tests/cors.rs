mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use common::{app, lunch, read, send};

fn with_origin(method: &str, uri: &str, origin: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, origin)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn allow_listed_origin_gets_cors_headers() {
    let app = app().await;

    let res = app
        .clone()
        .oneshot(with_origin(
            "GET",
            "/api/expenses",
            "http://localhost:5173",
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn preview_origin_is_accepted() {
    let app = app().await;

    let (status, _) = send(
        &app,
        with_origin(
            "GET",
            "/api/expenses",
            "https://expense-tracker-pr-42.vercel.app",
            Body::empty(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn preflight_from_allowed_origin_succeeds() {
    let app = app().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/expenses")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let res = app.clone().oneshot(request).await.unwrap();

    assert!(res.status().is_success());
    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn foreign_origin_is_rejected_before_any_write() {
    let app = app().await;

    let res = app
        .clone()
        .oneshot(with_origin(
            "POST",
            "/api/expenses",
            "https://evil.example.net",
            Body::from(lunch().to_string()),
        ))
        .await
        .unwrap();
    let (status, body) = read(res).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (_, body) = send(
        &app,
        Request::builder()
            .uri("/api/expenses")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn foreign_preflight_is_rejected() {
    let app = app().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/expenses")
        .header(header::ORIGIN, "https://other-app.vercel.app")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();

    let res = app.clone().oneshot(request).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
