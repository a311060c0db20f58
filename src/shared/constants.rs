/// Default page size for item listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// UPLOADS
// =============================================================================

/// File extensions accepted for item images (lowercase, with leading dot)
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Extra body allowance on top of the file cap for multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
