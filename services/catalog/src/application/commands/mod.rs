//! Commands module

pub mod product_commands;

pub use product_commands::*;
