//! Route handlers, one module per resource.

use axum::{http::StatusCode, Json};

use crate::error::MessageBody;

pub mod categories;
pub mod products;
pub mod tags;

/// JSON body carrying a fixed message.
pub(crate) fn message(text: &str) -> Json<MessageBody> {
    Json(MessageBody {
        message: text.to_string(),
    })
}

/// Fallback for every path without a route.
pub async fn not_found() -> (StatusCode, Json<MessageBody>) {
    (StatusCode::NOT_FOUND, message("Wrong route"))
}
