/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login
/// - `users`: Registration and account management
/// - `todos`: Todo CRUD
/// - `todo_items`: Item CRUD nested under a todo
///
/// Handlers take [`ApiPath`] and [`ValidatedJson`] instead of the plain axum
/// extractors so that malformed input is reported in the API error format.

pub mod auth;
pub mod health;
pub mod todo_items;
pub mod todos;
pub mod users;

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Path extractor rejecting with [`ApiError::BadRequest`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// JSON body extractor that also runs `validator` rules
///
/// Malformed JSON is a 400, failed rules are a 422.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
