use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppPath;
use crate::features::items::dtos::ItemResponseDto;
use crate::features::items::ItemService;
use crate::shared::types::ApiResponse;

/// Approve a flagged item
///
/// Clears `is_flagged` so the item shows up in unflagged listings again.
#[utoipa::path(
    patch,
    path = "/admin/items/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item approved", body = ApiResponse<ItemResponseDto>),
        (status = 404, description = "Item not found")
    ),
    tag = "admin"
)]
pub async fn approve_item(
    State(service): State<Arc<ItemService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.approve(id).await?;

    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Item approved".to_string()),
        None,
    )))
}

/// Reject an item
///
/// Permanently deletes the item.
#[utoipa::path(
    delete,
    path = "/admin/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item rejected and deleted"),
        (status = 404, description = "Item not found")
    ),
    tag = "admin"
)]
pub async fn reject_item(
    State(service): State<Arc<ItemService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode> {
    service.reject(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
