//! rpcscope - Main Entry Point
//! JSON-RPC server with request-scoped resolution contexts

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rpcscope_api_rpc::{MethodRegistry, RpcServer, RpcServerConfig};
use rpcscope_core::application::FactoryProvider;
use rpcscope_daemon::{encoder_from_env, register_builtins, register_providers, ServerInfo};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("RPCSCOPE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("rpcscope=info"))?;

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("rpcscope v{} starting...", VERSION);

    // 2. Load configuration
    let rpc_config = RpcServerConfig::from_env();
    let encoder = encoder_from_env();

    // 3. Setup dependencies (DI wiring)
    let mut provider = FactoryProvider::new();
    register_providers(
        &mut provider,
        Arc::new(ServerInfo {
            version: VERSION,
            started_at: Instant::now(),
        }),
    );

    let mut registry = MethodRegistry::new(encoder);
    register_builtins(&mut registry)?;

    // 4. Start JSON-RPC server
    let rpc_server = RpcServer::new(rpc_config, Arc::new(registry), Arc::new(provider));
    let (addr, rpc_handle) = rpc_server.start().await?;

    info!(addr = %addr, "System ready. Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 6. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}
