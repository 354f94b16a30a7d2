//! HTTP error mapping.
//!
//! Failures on create/update routes answer 400 and failures on read/delete
//! routes answer 500; a missing row answers 404 on either. Every error body
//! is `{"message": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use catalog::CatalogError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity name, e.g. `"Product"`.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl ApiError {
    /// Map an error raised while creating or updating.
    pub fn on_write(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, .. } => Self::NotFound(entity),
            other => Self::BadRequest(other.to_string()),
        }
    }

    /// Map an error raised while reading or deleting.
    pub fn on_read(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, .. } => Self::NotFound(entity),
            other => Self::Internal(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(message) => error!("Request failed: {message}"),
            Self::BadRequest(message) => warn!("Rejected request: {message}"),
            Self::NotFound(_) => {}
        }
        (
            status,
            Json(MessageBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
