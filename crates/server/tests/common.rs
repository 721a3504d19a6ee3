#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::Value;
use server::{CorsPolicy, ServerConfig};
use tower::ServiceExt;

pub async fn app_with(config: ServerConfig) -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();
    server::app(engine, config)
}

pub async fn app() -> Router {
    app_with(ServerConfig {
        api_prefix: "/api".to_string(),
        cors: CorsPolicy::new(
            ["http://localhost:5173"],
            Some(r"https://expense-tracker-[a-z0-9-]+\.vercel\.app"),
        )
        .unwrap(),
    })
    .await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(request).await.unwrap();
    read(res).await
}

pub async fn read(res: Response<Body>) -> (StatusCode, Value) {
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn lunch() -> Value {
    serde_json::json!({
        "title": "Lunch",
        "amount": 12.5,
        "category": "Food & Dining",
        "date": "2024-01-01",
        "notes": "team lunch",
    })
}
