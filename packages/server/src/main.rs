use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use folio_common::Assets;
use folio_common::storage::filesystem::FilesystemAssetStore;
use tracing::{Level, info};

use folio_server::config::AppConfig;
use folio_server::guard::OwnerSecret;
use folio_server::state::AppState;
use folio_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let store = FilesystemAssetStore::new(config.site.pages_dir.clone())
        .await
        .context("Failed to open pages directory")?;
    let assets = Assets::new(Arc::new(store));
    assets
        .ensure_layout()
        .await
        .context("Failed to create page directories")?;

    seed::import_legacy_posts(&db, &assets).await;

    let owner_secret = OwnerSecret::from_plain(&config.auth.owner_password)
        .map_err(|e| anyhow::anyhow!("Failed to hash owner secret: {e}"))?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        assets,
        owner_secret: Arc::new(owner_secret),
    };
    let app = build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
