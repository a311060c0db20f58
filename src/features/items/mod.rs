//! Lost and found item reports.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/items` | Search, filter and paginate items |
//! | GET | `/items/{id}` | Get a single item |
//! | POST | `/items` | Create an item for an existing reporter |
//! | PATCH | `/items/{id}` | Partial update |
//! | DELETE | `/items/{id}` | Hard delete |
//!
//! Moderation (approve / reject) lives in the `admin` feature and reuses [`ItemService`].

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ItemService;
