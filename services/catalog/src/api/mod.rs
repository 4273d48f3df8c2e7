//! API layer - HTTP service implementations

pub mod dto;
pub mod ops;
pub mod routes;

pub use routes::{AppState, product_routes};
