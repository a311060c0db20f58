//! Item moderation: approve (clear the flag) or reject (delete).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | PATCH | `/admin/items/{id}/approve` | Clear `is_flagged` |
//! | DELETE | `/admin/items/{id}` | Hard delete |

pub mod handlers;
pub mod routes;

pub use routes::routes;
