//! 持久化层模块

pub mod connection;
pub mod error_mapper;
pub mod postgres;

pub use connection::{check_connection, create_pool};
pub use postgres::PostgresProductRepository;
