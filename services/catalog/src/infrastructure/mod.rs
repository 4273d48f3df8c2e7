//! 基础设施层

pub mod observability;
pub mod persistence;

pub use persistence::PostgresProductRepository;
