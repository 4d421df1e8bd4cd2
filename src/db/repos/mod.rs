//! Repository implementations for database access

pub mod products;

pub use products::{DbError, ProductRepo};
