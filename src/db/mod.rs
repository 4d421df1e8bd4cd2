//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Pool constructed explicitly at startup and injected through AppState
//! - One pooled connection and one transaction per write operation
//! - Not-found is an explicit error, never a null sentinel

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
