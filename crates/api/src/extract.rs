//! Extractors that turn request parts into handler inputs, rejecting with
//! [`ApiError`] so every failure answers with a `{"message"}` body.

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    Json,
};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;
use tracing::debug;

use catalog::{Category, Product, Tag};

use crate::ApiError;

/// Deserializes the body as `application/x-www-form-urlencoded` when the
/// request says so, and as JSON otherwise. Malformed bodies are a 400.
///
/// Forms may repeat a key to send a list, with or without the `[]` suffix:
/// `tagIds=1&tagIds=3` or `tagIds[]=1&tagIds[]=3`.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.to_string()))?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            Ok(Self(value))
        }
    }
}

/// A resource addressed by `/:id`.
pub trait Resource {
    /// Name used in the 404 message.
    const NAME: &'static str;
}

impl Resource for Product {
    const NAME: &'static str = "Product";
}

impl Resource for Category {
    const NAME: &'static str = "Category";
}

impl Resource for Tag {
    const NAME: &'static str = "Tag";
}

/// The integer `:id` segment of a resource route.
///
/// No row can have a key that is not an integer, so a malformed segment
/// answers the same 404 as an unknown id.
#[derive(Debug, Clone, Copy)]
pub struct PathId<R>(pub i64, pub PhantomData<fn() -> R>);

#[async_trait]
impl<S, R> FromRequestParts<S> for PathId<R>
where
    S: Send + Sync,
    R: Resource,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id, PhantomData)),
            Err(rejection) => {
                debug!(path = %parts.uri.path(), %rejection, "Unparseable resource id");
                Err(ApiError::NotFound(R::NAME))
            }
        }
    }
}
