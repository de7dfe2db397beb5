#![doc = "The `todo-api` library crate."]
#![doc = ""]
#![doc = "Core business logic for a token-authenticated per-user todo backend:"]
#![doc = "domain models, the response envelope, the typed error taxonomy,"]
#![doc = "authentication, and route handlers. The binary in `main.rs` wires"]
#![doc = "these together into a running server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;

pub use crate::error::AppError;
pub use crate::response::ApiResponse;
