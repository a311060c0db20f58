use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::features::uploads::handlers::upload_image;
use crate::features::uploads::services::UploadService;
use crate::shared::constants::MULTIPART_OVERHEAD_BYTES;

/// Create routes for the uploads feature
pub fn routes(service: Arc<UploadService>) -> Router {
    let body_limit = service.max_file_size() + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route(
            "/items/upload",
            post(upload_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(service)
}
