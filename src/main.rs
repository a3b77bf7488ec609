use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use signbridge_backend::config::Config;
use signbridge_backend::routes;
use signbridge_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("signbridge_backend=debug,tower_http=debug")
        .init();

    let config = Config::load_or_default("conf.yaml");

    // The asset directories are read-only inputs, but creating them keeps a
    // fresh checkout bootable before any GIFs are dropped in.
    std::fs::create_dir_all(&config.gifs_dir)?;
    std::fs::create_dir_all(&config.letters_dir)?;

    let app_state = AppState::new(config.clone())?;
    info!("Loaded {} keyword entries", app_state.keywords.len());

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
