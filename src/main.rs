mod auth;
mod client;
mod config;
mod logging;
mod provider;
mod record;
mod sanitize;
mod server;
mod tools;

use anyhow::Context;
use client::PdnsClient;
use config::ProviderConfig;
use provider::Provider;
use server::PowerDnsMcp;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ProviderConfig::from_env()?;
    logging::init_tracing(config.debug)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialise logging")?;

    let token = auth::find_token()?;
    tracing::info!(server_url = %config.server_url, server_id = %config.server_id, "starting PowerDNS MCP server");

    let provider = Arc::new(Provider::new(PdnsClient::new(&config, token)));
    let handler = PowerDnsMcp { provider };

    // MCP clients talk to us over stdin/stdout
    let service = rmcp::serve_server(handler, rmcp::transport::stdio())
        .await
        .context("Failed to start MCP server")?;

    service.waiting().await?;
    tracing::info!("client disconnected");

    Ok(())
}
