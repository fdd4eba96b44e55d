//! Transports: stdio (default) and streamable HTTP.

use crate::error::{Result, ServerError};
use crate::server::DocDocDocServer;
use axum::Router;
use axum::routing::get;
use rmcp::ServiceExt as _;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use std::net::SocketAddr;

pub const MCP_PATH: &str = "/mcp";
pub const HEALTH_PATH: &str = "/health";

/// Serve one MCP session over stdin/stdout until the client disconnects.
///
/// # Errors
///
/// Returns an error if the session cannot be initialized or ends abnormally.
pub async fn serve_stdio(server: DocDocDocServer) -> Result<()> {
    tracing::info!("serving MCP over stdio");
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServerError::Startup(format!("stdio session: {e}")))?;
    running
        .waiting()
        .await
        .map_err(|e| ServerError::Runtime(format!("stdio session: {e}")))?;
    tracing::info!("stdio session closed");
    Ok(())
}

/// Router exposing MCP at [`MCP_PATH`] and a liveness probe at [`HEALTH_PATH`].
pub fn http_router(server: DocDocDocServer) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );
    Router::new()
        .route(HEALTH_PATH, get(|| async { "ok" }))
        .nest_service(MCP_PATH, service)
}

/// Serve streamable HTTP on `bind` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve_http(server: DocDocDocServer, bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| ServerError::Startup(format!("bind {bind}: {e}")))?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, path = MCP_PATH, "serving MCP over streamable HTTP");

    axum::serve(listener, http_router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("http server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
