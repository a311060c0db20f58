//! Modules layer - Infrastructure components behind the features
//!
//! Contains adapters for resources outside the database, such as file storage.

pub mod storage;
