//! catalog-server: product catalog HTTP backend
//!
//! REST API over a `products` table plus an image upload endpoint and
//! guarded serving of previously uploaded files.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod service;
pub mod state;
pub mod uploads;

pub use config::ServerConfig;
pub use http::server::run_server;
pub use state::AppState;
