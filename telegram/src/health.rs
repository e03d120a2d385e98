use std::net::SocketAddr;

use anyhow::Result;
use axum::{Router, routing::get};

/// Liveness route, independent of bot and store state.
pub fn routes() -> Router {
    Router::new().route("/ping", get(ping))
}

async fn ping() -> &'static str {
    "OK"
}

pub async fn serve(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server is running on port {port}");
    axum::serve(listener, routes()).await?;
    Ok(())
}
