use utoipa::{Modify, OpenApi};

use crate::features::admin::handlers as admin_handlers;
use crate::features::items::{dtos as items_dtos, handlers as items_handlers, models as items_models};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Items
        items_handlers::list_items,
        items_handlers::get_item,
        items_handlers::create_item,
        items_handlers::update_item,
        items_handlers::delete_item,
        // Uploads
        uploads_handlers::upload_image,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        // Admin
        admin_handlers::approve_item,
        admin_handlers::reject_item,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Items
            items_models::ItemStatus,
            items_dtos::CreateItemDto,
            items_dtos::UpdateItemDto,
            items_dtos::ItemResponseDto,
            ApiResponse<items_dtos::ItemResponseDto>,
            ApiResponse<Vec<items_dtos::ItemResponseDto>>,
            // Uploads
            uploads_dtos::UploadImageDto,
            uploads_dtos::UploadResponseDto,
            ApiResponse<uploads_dtos::UploadResponseDto>,
            // Users
            users_models::UserRole,
            users_dtos::CreateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
        )
    ),
    tags(
        (name = "items", description = "Lost and found item reports"),
        (name = "uploads", description = "Item image upload"),
        (name = "users", description = "Reporting users"),
        (name = "admin", description = "Item moderation"),
    ),
    info(
        title = "Lost & Found API",
        version = "1.0.0",
        description = "REST API for reporting and searching lost and found items"
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
