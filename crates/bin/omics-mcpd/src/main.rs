//! Daemon entry point for the mcp-omics server.
//!
//! Loads configuration from the command line and environment, builds the
//! operation catalog, and serves it over the enabled transports until one of
//! them stops or the process is interrupted.

mod config;

use std::sync::Arc;

use omics_core::{Catalog, ProviderClient};
use omics_gateway::{GatewayServer, GatewayServerConfig};
use omics_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::OmicsConfig;

type ServeResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> ServeResult {
    let config = OmicsConfig::from_args()?;
    init_tracing(&config.log_filter);

    let client = ProviderClient::new(config.endpoints.clone(), config.http_timeout)?;
    let catalog = Arc::new(Catalog::new(client));
    info!(
        operations = catalog.operations().len(),
        "operation catalog ready"
    );

    let mut servers: JoinSet<(&'static str, ServeResult)> = JoinSet::new();
    if config.enable_stdio {
        let catalog = catalog.clone();
        servers.spawn(async move { ("stdio", serve_stdio(catalog).await) });
    }
    if config.mcp_serve {
        let catalog = catalog.clone();
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        servers.spawn(async move {
            ("mcp-http", serve_streamable_http(catalog, http_config).await)
        });
    }
    if config.gateway_serve {
        let gateway = GatewayServer::new(
            catalog.clone(),
            GatewayServerConfig::new(config.gateway_addr)
                .with_request_timeout(config.gateway_timeout),
        );
        servers.spawn(async move { ("gateway", gateway.serve().await) });
    }

    tokio::select! {
        finished = servers.join_next() => {
            if let Some(joined) = finished {
                let (name, result) = joined?;
                if let Err(err) = &result {
                    error!(server = name, error = %err, "server stopped");
                } else {
                    info!(server = name, "server stopped");
                }
                result?;
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("interrupt received, shutting down");
        }
    }

    servers.shutdown().await;
    Ok(())
}

/// Logs go to stderr so the stdio transport keeps stdout to itself.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
