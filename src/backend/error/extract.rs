//! JSON body extractor
//!
//! `axum::Json` rejects bad bodies with plain-text 400/415/422 responses.
//! `ApiJson` wraps it so every malformed body is a 400 in the same JSON
//! envelope as the rest of the API.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};

use crate::backend::error::BackendError;

/// JSON request body that rejects with `BackendError`
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::warn!("Invalid request body: {}", rejection.body_text());
                Err(BackendError::handler(
                    StatusCode::BAD_REQUEST,
                    "Invalid request body",
                ))
            }
        }
    }
}
