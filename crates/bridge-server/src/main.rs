//! Process entry point (§6 CLI surface): no subcommands, speaks JSON-RPC
//! over stdio from launch to shutdown. Exit code 0 on graceful shutdown,
//! non-zero only on a fatal init error.

use std::sync::Arc;

use anyhow::Context;
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use tracing::info;

use bridge_config::BridgeConfig;
use bridge_server::{AppState, BridgeServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bridge_server::init_logging();

    let config = BridgeConfig::from_env().context("loading bridge configuration")?;
    let state = Arc::new(AppState::init(&config).context("initialising bridge state")?);
    let handler = BridgeServer::new(state);

    let service = handler.serve(stdio()).await.context("starting stdio MCP service")?;
    info!("bridge-server running");

    service.waiting().await?;
    info!("bridge-server shutdown");
    Ok(())
}
