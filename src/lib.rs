pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::cart_store::CartStore;
use infrastructure::inventory_client::HttpInventoryClient;
use infrastructure::notifications::NotificationQueue;

pub use config::AppConfig;
pub use db::{create_pool, DbPool};
pub use domain::ports::SnapshotStorage;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type AppCartStore =
    CartStore<HttpInventoryClient, Box<dyn SnapshotStorage>, Arc<NotificationQueue>>;

/// Shared by every handler. Built once at the root and injected as app data.
pub struct AppState {
    pub cart: AppCartStore,
    pub notifications: Arc<NotificationQueue>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::cart::get_cart,
        handlers::cart::get_item,
        handlers::cart::add_item,
        handlers::cart::update_amount,
        handlers::cart::remove_item,
        handlers::cart::drain_notifications,
    ),
    components(schemas(
        handlers::cart::LineItemResponse,
        handlers::cart::UpdateAmountRequest,
        handlers::cart::NotificationsResponse,
    )),
    tags((name = "cart", description = "Shopping cart"))
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(
    pool: &DbPool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Registers the `/cart` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(handlers::cart::get_cart))
            .route(
                "/notifications",
                web::get().to(handlers::cart::drain_notifications),
            )
            .service(
                web::resource("/items/{id}")
                    .route(web::get().to(handlers::cart::get_item))
                    .route(web::post().to(handlers::cart::add_item))
                    .route(web::put().to(handlers::cart::update_amount))
                    .route(web::delete().to(handlers::cart::remove_item)),
            ),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
