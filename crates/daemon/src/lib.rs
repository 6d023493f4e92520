//! rpcscope Daemon - composition pieces shared by the binary and tests

pub mod builtins;

pub use builtins::{register_builtins, register_providers, ServerInfo};

use rpcscope_core::port::{ErrorEncoder, PlainEncoder, ReferenceEncoder};
use std::sync::Arc;

/// `RPCSCOPE_DEBUG_ERRORS=true` sends plain diagnostics to clients;
/// otherwise they are logged and replaced by a reference id
pub fn encoder_from_env() -> Arc<dyn ErrorEncoder> {
    let debug = std::env::var("RPCSCOPE_DEBUG_ERRORS")
        .ok()
        .and_then(|s| s.parse::<bool>().ok())
        .unwrap_or(false);

    if debug {
        Arc::new(PlainEncoder)
    } else {
        Arc::new(ReferenceEncoder)
    }
}
