//! Server configuration - environment loading and defaults
//!
//! Configuration is loaded from environment variables:
//! - `CATALOG_BIND`: socket address to bind (default: 127.0.0.1:8080)
//! - `CATALOG_DATABASE_URL`: SQLite connection string
//! - `CATALOG_UPLOADS_DIR`: directory for uploaded images
//! - `CATALOG_CORS_PERMISSIVE`: set to "1"/"true" to allow any origin

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8080)
    pub bind_addr: SocketAddr,

    /// Database connection string
    pub database_url: String,

    /// Directory where uploaded images are stored
    pub uploads_dir: PathBuf,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_url: "sqlite:catalog.db".to_string(),
            uploads_dir: PathBuf::from("uploads"),
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = std::env::var("CATALOG_BIND")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.bind_addr);

        let database_url =
            std::env::var("CATALOG_DATABASE_URL").unwrap_or(defaults.database_url);

        let uploads_dir = std::env::var("CATALOG_UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.uploads_dir);

        let cors_permissive = std::env::var("CATALOG_CORS_PERMISSIVE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            bind_addr,
            database_url,
            uploads_dir,
            cors_permissive,
        }
    }

    /// Create config with an explicit uploads root (for testing)
    pub fn with_uploads_dir(uploads_dir: PathBuf) -> Self {
        Self {
            uploads_dir,
            ..Self::default()
        }
    }
}
