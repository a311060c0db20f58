//! Storage module for uploaded files
//!
//! Files are written to a local directory that the HTTP server also serves
//! statically under a public path.

mod local_storage;

pub use local_storage::LocalStorage;
