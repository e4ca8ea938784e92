//! Extractors that turn axum's plain-text rejections into `JoblyError::BadRequest`,
//! so every 4xx carries the same JSON envelope.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::JoblyError;

/// Query-string filter; unknown keys and non-numeric bounds are bad requests.
pub struct FilterQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for FilterQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JoblyError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(JoblyError::BadRequest(rejection.body_text())),
        }
    }
}

pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = JoblyError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(JoblyError::BadRequest(rejection.body_text())),
        }
    }
}

/// JSON body; malformed JSON, wrong types and unknown fields are bad requests.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JoblyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(JoblyError::BadRequest(rejection.body_text())),
        }
    }
}
