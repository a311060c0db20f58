use std::sync::Arc;

use axum::{
    routing::{delete, patch},
    Router,
};

use crate::features::admin::handlers;
use crate::features::items::ItemService;

/// Create admin moderation routes, nested under `/admin`
///
/// Note: there is no authentication layer in front of these yet.
pub fn routes(item_service: Arc<ItemService>) -> Router {
    Router::new()
        .route("/items/{id}/approve", patch(handlers::approve_item))
        .route("/items/{id}", delete(handlers::reject_item))
        .with_state(item_service)
}
