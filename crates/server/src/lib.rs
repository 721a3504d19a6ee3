use api_types::envelope::Failure;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use cors::{CorsPolicy, CorsPolicyError};
pub use server::{ServerConfig, app, run_with_listener, spawn_with_listener};

mod cors;
mod expenses;
mod extract;
mod server;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{Expense, ExpenseFields, ExpenseInput};
    }

    pub mod envelope {
        pub use api_types::envelope::{Empty, Failure, Success};
    }
}

/// Message returned for every 500: details only go to the log.
const INTERNAL_MESSAGE: &str = "Server Error";

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Malformed request (bad JSON, wrong content type).
    Generic(String),
    NotFound(String),
    MethodNotAllowed,
    OriginRejected(String),
    Internal,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            INTERNAL_MESSAGE.to_string()
        }
        EngineError::NotFound(_) => "Expense not found".to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            ServerError::OriginRejected(origin) => (
                StatusCode::FORBIDDEN,
                format!("origin {origin} is not allowed"),
            ),
            ServerError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
            ),
        };

        (status, Json(Failure::new(message))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_validation_maps_to_400() {
        let res =
            ServerError::from(EngineError::Validation("Title is required".to_string()))
                .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_database_maps_to_500_without_details() {
        let err = EngineError::Database(sea_orm_err());
        assert_eq!(message_for_engine_error(err), INTERNAL_MESSAGE);
        let res = ServerError::from(EngineError::Database(sea_orm_err())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn method_not_allowed_maps_to_405() {
        let res = ServerError::MethodNotAllowed.into_response();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn rejected_origin_maps_to_403() {
        let res = ServerError::OriginRejected("https://evil.test".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    fn sea_orm_err() -> sea_orm::DbErr {
        sea_orm::DbErr::Custom("disk I/O error at page 7".to_string())
    }
}
