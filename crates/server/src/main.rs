mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

use database::db::shared_connection;
use log::info;
use sea_orm::DatabaseConnection;
use std::env;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utils::shutdown::shutdown_signal;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let db = shared_connection().await?.clone();
    let app = routes::router(AppState { db })
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()));

    let addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Running axum on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
