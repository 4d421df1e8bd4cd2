//! catalog-server binary: config, pool, migrations, serve

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use catalog_server::config::ServerConfig;
use catalog_server::db;
use catalog_server::http::server::run_server;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        bind = %config.bind_addr,
        uploads = %config.uploads_dir.display(),
        "Starting catalog server"
    );

    let pool = db::create_pool(&config.database_url).await?;
    db::migrations::run(&pool).await?;

    run_server(pool, config).await?;
    Ok(())
}
