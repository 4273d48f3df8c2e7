//! 值对象

pub mod ids;
pub mod product_name;

pub use ids::*;
pub use product_name::*;
