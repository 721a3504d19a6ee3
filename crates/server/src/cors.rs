//! Cross-origin policy.
//!
//! An origin is accepted when it is on the allow-list or matches the preview
//! deployment pattern. Requests from any other origin are answered with 403
//! before reaching a handler; requests without an `Origin` header pass.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use regex::Regex;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum CorsPolicyError {
    #[error("invalid preview origin pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
    preview_pattern: Option<Regex>,
}

impl CorsPolicy {
    /// Builds a policy from exact origins and an optional regex for preview
    /// deployments. The regex must match the whole origin.
    pub fn new<I, S>(allowed_origins: I, preview_pattern: Option<&str>) -> Result<Self, CorsPolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed_origins = allowed_origins
            .into_iter()
            .map(Into::into)
            .map(|origin: String| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        let preview_pattern = preview_pattern
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| Regex::new(&format!("^(?:{pattern})$")))
            .transpose()?;

        Ok(Self {
            allowed_origins,
            preview_pattern,
        })
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
            || self
                .preview_pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(origin))
    }

    /// The `tower-http` layer adding CORS headers for accepted origins.
    pub(crate) fn layer(self: &Arc<Self>) -> CorsLayer {
        let policy = Arc::clone(self);
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _parts: &Parts| {
                    origin.to_str().is_ok_and(|origin| policy.allows(origin))
                },
            ))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
    }
}

/// Rejects requests whose `Origin` is not accepted by the policy.
pub(crate) async fn origin_guard(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        if !policy.allows(origin) {
            tracing::warn!("rejected request from origin {origin:?}");
            return ServerError::OriginRejected(origin.to_string()).into_response();
        }
    }
    next.run(request).await
}
