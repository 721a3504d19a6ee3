use std::{any::Any, sync::Arc};

use axum::{
    Router,
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{CorsPolicy, ServerError, cors, expenses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Routing and cross-origin settings of the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path the `/expenses` resource is nested under, e.g. `/api`.
    /// Empty or `/` serves it from the root.
    pub api_prefix: String,
    pub cors: CorsPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            cors: CorsPolicy::default(),
        }
    }
}

impl ServerConfig {
    fn normalized_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}

fn expense_routes(state: ServerState) -> Router {
    Router::new()
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn not_found() -> ServerError {
    ServerError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("request handler panicked: {detail}");
    ServerError::Internal.into_response()
}

/// Layers shared by every route: origin rejection, CORS headers, panic
/// catching and request tracing (outermost last).
fn with_boundary(router: Router, policy: CorsPolicy) -> Router {
    let policy = Arc::new(policy);
    router
        .layer(policy.layer())
        .layer(middleware::from_fn_with_state(
            Arc::clone(&policy),
            cors::origin_guard,
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Builds the complete application router.
pub fn app(engine: Engine, config: ServerConfig) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    let prefix = config.normalized_prefix();
    let list_path = format!("{prefix}/expenses");
    let api = expense_routes(state);
    let router = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&prefix, api)
    };

    let router = router
        .route(
            "/",
            get(move || {
                let target = list_path.clone();
                async move { (StatusCode::FOUND, [(header::LOCATION, target)]) }
            }),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found);

    with_boundary(router, config.cors)
}

pub async fn run_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, config)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, config, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
