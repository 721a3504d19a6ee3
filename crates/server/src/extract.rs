use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::ServerError;

/// `Json` extractor whose rejection is rendered with the error envelope.
pub(crate) struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("rejected request body: {rejection}");
                Err(ServerError::Generic(rejection.body_text()))
            }
        }
    }
}
