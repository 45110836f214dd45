//! Daemon entry point for the CAMS MCP server.
//!
//! Loads configuration from the environment, builds the catalog client and
//! control plane, and serves the MCP protocol over streamable HTTP and/or
//! stdio.

mod config;

use cams_client::CamsClient;
use cams_core::CatalogControlPlane;
use cams_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CamsdConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = CamsdConfig::from_args()?;
    let client = CamsClient::new(config.client_config()?)?;
    let control = CatalogControlPlane::new(client);

    info!(base_url = %config.base_url, "cams-mcpd starting");

    if config.mcp_serve && config.enable_stdio {
        let http_control = control.clone();
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        let http = tokio::spawn(async move {
            if let Err(err) = serve_streamable_http(http_control, http_config).await {
                tracing::error!("MCP HTTP server exited: {err}");
            }
        });
        serve_stdio(control).await?;
        http.abort();
    } else if config.mcp_serve {
        info!(addr = %config.mcp_http_addr, "serving MCP over streamable HTTP");
        serve_streamable_http(control, McpHttpServerConfig::new(config.mcp_http_addr)).await?;
    } else {
        serve_stdio(control).await?;
    }
    Ok(())
}
