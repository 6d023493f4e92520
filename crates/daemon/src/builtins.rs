//! Built-in methods and values every server exposes

use rpcscope_api_rpc::error::RegistryError;
use rpcscope_api_rpc::MethodRegistry;
use rpcscope_core::application::FactoryProvider;
use rpcscope_core::port::Resolvable;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

pub const PING: &str = "rpc/ping.v1";
pub const METHODS: &str = "rpc/methods.v1";

/// Process-wide facts, shared by every call's context
pub struct ServerInfo {
    pub version: &'static str,
    pub started_at: Instant,
}

impl Resolvable for ServerInfo {}

/// Register the values built-in methods depend on
pub fn register_providers(provider: &mut FactoryProvider, info: Arc<ServerInfo>) {
    provider.register::<ServerInfo, _>(move |_| Ok(Arc::clone(&info)));
}

/// Register `rpc/ping.v1` and `rpc/methods.v1`.
///
/// Call last: the method list is captured at registration time.
pub fn register_builtins(registry: &mut MethodRegistry) -> Result<(), RegistryError> {
    registry.register(PING, |ctx, _, _| {
        let info = ctx.require::<ServerInfo>()?;
        Ok(json!({
            "pong": true,
            "version": info.version,
            "uptime_ms": info.started_at.elapsed().as_millis() as u64,
        }))
    })?;

    let mut names: Vec<&'static str> = registry.method_names();
    names.push(METHODS);
    names.sort_unstable();
    registry.register(METHODS, move |_, _, _| {
        Ok(Value::from(
            names.iter().map(|n| Value::from(*n)).collect::<Vec<_>>(),
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpcscope_api_rpc::RpcHandler;
    use rpcscope_core::port::PlainEncoder;
    use std::time::Duration;

    fn handler() -> RpcHandler {
        let mut registry = MethodRegistry::new(Arc::new(PlainEncoder));
        registry
            .register("demo/echo.v1", |_, payload, _| Ok(payload))
            .unwrap();
        register_builtins(&mut registry).unwrap();

        let mut provider = FactoryProvider::new();
        register_providers(
            &mut provider,
            Arc::new(ServerInfo {
                version: "test",
                started_at: Instant::now(),
            }),
        );

        RpcHandler::new(Arc::new(registry), Arc::new(provider), Duration::from_secs(1))
    }

    #[test]
    fn test_ping() {
        let out = handler().invoke(PING, Value::Null).unwrap();
        assert_eq!(out["pong"], true);
        assert_eq!(out["version"], "test");
    }

    #[test]
    fn test_methods_lists_everything() {
        let out = handler().invoke(METHODS, Value::Null).unwrap();
        assert_eq!(out, json!(["demo/echo.v1", "rpc/methods.v1", "rpc/ping.v1"]));
    }
}
