use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{UploadImageDto, UploadResponseDto};
use crate::features::uploads::services::UploadService;
use crate::shared::types::ApiResponse;

/// Upload an item image
///
/// Accepts multipart/form-data with a single `file` field. The stored file is
/// renamed and served from the returned `url`.
#[utoipa::path(
    post,
    path = "/items/upload",
    tag = "uploads",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image file to attach to an item",
    ),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Missing file, disallowed type or file too large"),
        (status = 413, description = "Request body too large")
    )
)]
pub async fn upload_image(
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponseDto>>)> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some("file") {
            debug!("Ignoring multipart field: {:?}", field.name());
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        upload = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let response = service.upload_image(&filename, &data).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}
