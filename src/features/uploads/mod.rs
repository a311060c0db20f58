//! Item image uploads, stored on the local filesystem.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/items/upload` | Upload an image (multipart field `file`) |
//!
//! Stored files are served statically under the configured public path.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::UploadService;
