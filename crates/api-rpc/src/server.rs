//! JSON-RPC Server
//!
//! Exposes every method of a `MethodRegistry` over HTTP/WebSocket through
//! jsonrpsee. Handlers run on the blocking pool since providers may do I/O.

use crate::error::ServerError;
use crate::handler::{payload_from_params, RpcHandler};
use crate::registry::MethodRegistry;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use rpcscope_core::port::Provider;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9528;
const DEFAULT_CALL_TIMEOUT_MS: u64 = 30_000;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
    /// Deadline given to every call's root scope
    pub call_timeout: Duration,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
            call_timeout: Duration::from_millis(DEFAULT_CALL_TIMEOUT_MS),
        }
    }
}

impl RpcServerConfig {
    /// Read `RPCSCOPE_RPC_HOST`, `RPCSCOPE_RPC_PORT` and
    /// `RPCSCOPE_CALL_TIMEOUT_MS`, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("RPCSCOPE_RPC_HOST").unwrap_or(defaults.host);

        let port: u16 = std::env::var("RPCSCOPE_RPC_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let call_timeout = std::env::var("RPCSCOPE_CALL_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.call_timeout);

        Self {
            host,
            port,
            call_timeout,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        registry: Arc<MethodRegistry>,
        provider: Arc<dyn Provider>,
    ) -> Self {
        let handler = Arc::new(RpcHandler::new(registry, provider, config.call_timeout));
        Self { config, handler }
    }

    /// Start the JSON-RPC server, returning its bound address and handle
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| ServerError::Build {
                addr: addr.clone(),
                reason: e.to_string(),
            })?;
        let local_addr = server.local_addr().map_err(|e| ServerError::Build {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;

        let mut module = RpcModule::new(());
        for name in self.handler.registry().method_names() {
            let handler = self.handler.clone();
            module
                .register_blocking_method(name, move |params, _, _| {
                    let params: Value = params.parse()?;
                    handler.invoke(name, payload_from_params(params))
                })
                .map_err(|e| ServerError::Register {
                    method: name.to_string(),
                    reason: e.to_string(),
                })?;
        }

        info!(
            addr = %local_addr,
            methods = module.method_names().count(),
            "JSON-RPC server started successfully"
        );

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}
