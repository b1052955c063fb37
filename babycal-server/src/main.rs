mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use babycal_core::{BabycalConfig, logging};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional first argument: path to a config file
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = BabycalConfig::load(config_path.as_deref())?;
    logging::init_with_level(&config.log_level);

    let state = AppState::new(&config)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::calendar::router())
        .with_state(state)
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    info!("babycal-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
