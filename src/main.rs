use std::io;
use std::sync::Arc;

use actix_web::web;
use cart_service::application::cart_store::CartStore;
use cart_service::infrastructure::inventory_client::HttpInventoryClient;
use cart_service::infrastructure::memory_storage::InMemorySnapshotStorage;
use cart_service::infrastructure::notifications::NotificationQueue;
use cart_service::infrastructure::snapshot_repo::DieselSnapshotStorage;
use cart_service::{
    build_server, create_pool, run_migrations, AppConfig, AppState, SnapshotStorage,
};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let storage: Box<dyn SnapshotStorage> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).map_err(io::Error::other)?;
            run_migrations(&pool).map_err(io::Error::other)?;
            Box::new(DieselSnapshotStorage::new(pool))
        }
        None => {
            log::warn!("DATABASE_URL not set, cart snapshots will not survive a restart");
            Box::new(InMemorySnapshotStorage::new())
        }
    };

    let inventory =
        HttpInventoryClient::new(config.inventory_url.as_str(), config.inventory_timeout)
            .map_err(io::Error::other)?;
    let notifications = Arc::new(NotificationQueue::new());
    let cart = CartStore::load(
        inventory,
        storage,
        notifications.clone(),
        config.storage_key.as_str(),
    )
    .map_err(io::Error::other)?;

    let state = web::Data::new(AppState {
        cart,
        notifications,
    });

    log::info!(
        "Starting cart service at http://{}:{} (inventory: {})",
        config.host,
        config.port,
        config.inventory_url
    );

    build_server(state, &config.host, config.port)?.await
}
