use sea_orm::Database;
use tracing::info;

use ircgate_bridge::config::BridgeConfig;
use ircgate_bridge::router::build_router;
use ircgate_bridge::state::AppState;
use ircgate_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = BridgeConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let port = config.bridge_port;
    let state = AppState::new(config, db);
    let router = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("bridge service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
