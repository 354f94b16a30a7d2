use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use catalog::{products as product_service, NewProduct, Product, ProductChanges};
use db::models::ProductRow;

use super::message;
use crate::{error::MessageBody, extract::{PathId, Payload}, ApiError, AppState};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = product_service::list_products(&state.pool)
        .await
        .map_err(ApiError::on_read)?;
    Ok(Json(products))
}

pub async fn get(
    PathId(id, _): PathId<Product>,
    State(state): State<AppState>,
) -> Result<Json<Product>, ApiError> {
    let product = product_service::get_product(&state.pool, id)
        .await
        .map_err(ApiError::on_read)?;
    Ok(Json(product))
}

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<NewProduct>,
) -> Result<(StatusCode, Json<ProductRow>), ApiError> {
    let product = product_service::create_product(&state.pool, payload)
        .await
        .map_err(ApiError::on_write)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    PathId(id, _): PathId<Product>,
    State(state): State<AppState>,
    Payload(payload): Payload<ProductChanges>,
) -> Result<Json<MessageBody>, ApiError> {
    product_service::update_product(&state.pool, id, payload)
        .await
        .map_err(ApiError::on_write)?;
    Ok(message("Product updated successfully"))
}

pub async fn delete(
    PathId(id, _): PathId<Product>,
    State(state): State<AppState>,
) -> Result<Json<MessageBody>, ApiError> {
    product_service::delete_product(&state.pool, id)
        .await
        .map_err(ApiError::on_read)?;
    Ok(message("Product deleted successfully"))
}
