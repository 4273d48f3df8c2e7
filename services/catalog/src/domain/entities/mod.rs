//! 实体模块

mod product;

pub use product::Product;
