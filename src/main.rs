mod app;
mod db;
mod routes;
mod services;
mod types;
mod utils;

use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::services::catalog::attachment_store::AttachmentStore;
use crate::services::catalog::catalog_service::CatalogService;
use crate::services::catalog::stop_registry::StopRegistry;
use crate::services::replica::replica_client::{ReplicaClient, ReplicaConfig};
use crate::types::app_state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    info!("Starting app...");

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://busline.db?mode=rwc".to_string());
    let pool = db::connect(&database_url)
        .await
        .expect("Failed to connect to the database");

    let attachments_dir = PathBuf::from(
        env::var("ATTACHMENTS_DIR").unwrap_or_else(|_| "attachments".to_string()),
    );
    let attachments = AttachmentStore::new(attachments_dir);
    attachments
        .create_dir()
        .expect("Failed to create the attachments directory");

    // Mirroring is off entirely when no replica host is configured.
    let replica = env::var("REPLICA_URL").ok().map(|host| {
        ReplicaClient::new(ReplicaConfig {
            host,
            api_key: env::var("REPLICA_API_KEY").unwrap_or_default(),
        })
    });

    let state = AppState {
        catalog: CatalogService::new(pool.clone(), attachments),
        stops: StopRegistry::new(pool),
        replica,
    };
    let app = app::gen_app(state);

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    info!("Listening on port {}", port);
    axum::serve(listener, app).await.unwrap();
}
