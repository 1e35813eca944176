//! Integration Gateway CLI - serves configured integration API functions over HTTP

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use gateway_server::{GatewayConfig, GatewayServer};

/// Integration Gateway - per-request API function resolution for configured integrations
#[derive(Parser, Debug)]
#[command(name = "integration-gateway")]
#[command(version = "0.1.0")]
#[command(about = "HTTP gateway that resolves and invokes integration API functions")]
struct Args {
    /// Path to the gateway configuration file
    #[arg(long, env = "GATEWAY_CONFIG", default_value = "gateway.json")]
    config: PathBuf,

    /// Port to serve on (overrides the configured port)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = GatewayConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let registry = config.build_registry()?;
    let port = args.port.unwrap_or(config.port);

    info!("Serving {} integrations on port {}", registry.len(), port);

    let server = GatewayServer::new(registry, port);
    server.run().await?;

    Ok(())
}
