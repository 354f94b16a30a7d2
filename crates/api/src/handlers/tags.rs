use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use catalog::{tags as tag_service, NewTag, Tag, TagChanges, TagWithProducts};

use super::message;
use crate::{error::MessageBody, extract::{PathId, Payload}, ApiError, AppState};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TagWithProducts>>, ApiError> {
    let tags = tag_service::list_tags(&state.pool)
        .await
        .map_err(ApiError::on_read)?;
    Ok(Json(tags))
}

pub async fn get(
    PathId(id, _): PathId<Tag>,
    State(state): State<AppState>,
) -> Result<Json<TagWithProducts>, ApiError> {
    let tag = tag_service::get_tag(&state.pool, id)
        .await
        .map_err(ApiError::on_read)?;
    Ok(Json(tag))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<NewTag>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let tag = tag_service::create_tag(&state.pool, payload)
        .await
        .map_err(ApiError::on_write)?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn update(
    PathId(id, _): PathId<Tag>,
    State(state): State<AppState>,
    Payload(payload): Payload<TagChanges>,
) -> Result<Json<MessageBody>, ApiError> {
    tag_service::update_tag(&state.pool, id, payload)
        .await
        .map_err(ApiError::on_write)?;
    Ok(message("Tag updated successfully"))
}

pub async fn delete(
    PathId(id, _): PathId<Tag>,
    State(state): State<AppState>,
) -> Result<Json<MessageBody>, ApiError> {
    tag_service::delete_tag(&state.pool, id)
        .await
        .map_err(ApiError::on_read)?;
    Ok(message("Tag deleted successfully"))
}
