use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::items::dtos::{
    CreateItemDto, ItemChanges, ItemQueryParams, ItemResponseDto, UpdateItemDto,
};
use crate::features::items::services::ItemService;
use crate::shared::types::{ApiResponse, Meta};

/// List items
///
/// Filters combine with AND. `query` matches title, description or location case-insensitively.
/// Results are newest first; `meta.total` counts the whole filtered set.
#[utoipa::path(
    get,
    path = "/items",
    params(ItemQueryParams),
    responses(
        (status = 200, description = "Paginated list of items", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 400, description = "Invalid pagination or filter parameters")
    ),
    tag = "items"
)]
pub async fn list_items(
    State(service): State<Arc<ItemService>>,
    AppQuery(params): AppQuery<ItemQueryParams>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (items, total) = service.list(&params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paginated(total, params.page, params.page_size)),
    )))
}

/// Get item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ApiResponse<ItemResponseDto>),
        (status = 404, description = "Item not found")
    ),
    tag = "items"
)]
pub async fn get_item(
    State(service): State<Arc<ItemService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Report a lost or found item
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Item created", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Reporter user not found")
    ),
    tag = "items"
)]
pub async fn create_item(
    State(service): State<Arc<ItemService>>,
    AppJson(dto): AppJson<CreateItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(item), None, None)),
    ))
}

/// Partially update an item
///
/// Only keys present in the body are applied. `null` clears `image_url` / `contact_info`
/// and is rejected for required fields.
#[utoipa::path(
    patch,
    path = "/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Item not found")
    ),
    tag = "items"
)]
pub async fn update_item(
    State(service): State<Arc<ItemService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateItemDto>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let changes = ItemChanges::try_from(dto)?;
    let item = service.update(id, changes).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found")
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(service): State<Arc<ItemService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
