use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use catalog::{
    categories as category_service, Category, CategoryChanges, CategoryWithProducts, NewCategory,
};

use super::message;
use crate::{error::MessageBody, extract::{PathId, Payload}, ApiError, AppState};

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithProducts>>, ApiError> {
    let categories = category_service::list_categories(&state.pool)
        .await
        .map_err(ApiError::on_read)?;
    Ok(Json(categories))
}

pub async fn get(
    PathId(id, _): PathId<Category>,
    State(state): State<AppState>,
) -> Result<Json<CategoryWithProducts>, ApiError> {
    let category = category_service::get_category(&state.pool, id)
        .await
        .map_err(ApiError::on_read)?;
    Ok(Json(category))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = category_service::create_category(&state.pool, payload)
        .await
        .map_err(ApiError::on_write)?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    PathId(id, _): PathId<Category>,
    State(state): State<AppState>,
    Payload(payload): Payload<CategoryChanges>,
) -> Result<Json<MessageBody>, ApiError> {
    category_service::update_category(&state.pool, id, payload)
        .await
        .map_err(ApiError::on_write)?;
    Ok(message("Category updated successfully"))
}

pub async fn delete(
    PathId(id, _): PathId<Category>,
    State(state): State<AppState>,
) -> Result<Json<MessageBody>, ApiError> {
    category_service::delete_category(&state.pool, id)
        .await
        .map_err(ApiError::on_read)?;
    Ok(message("Category deleted successfully"))
}
