use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Image upload form, for Swagger UI documentation only.
/// The handler reads the multipart body directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// Image file (.jpg, .jpeg, .png, .webp or .gif)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Stored image location
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    /// Generated name the file was stored under
    #[schema(example = "0b9f6a2e-6c1c-4d8e-9a53-2f4c8e7d1a10.jpg")]
    pub filename: String,
    /// Public URL to use as an item's `image_url`
    #[schema(example = "/uploads/0b9f6a2e-6c1c-4d8e-9a53-2f4c8e7d1a10.jpg")]
    pub url: String,
}
