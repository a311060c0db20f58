//! Users who report items.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/users` | List users |
//! | GET | `/users/{id}` | Get a single user |
//! | POST | `/users` | Create a user (email must be unique) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::UserService;
