// Method Dispatch Port - routes `<system>/<method>.v<version>` calls

use crate::application::context::Context;
use crate::domain::RpcError;
use crate::error::ResolveError;
use crate::port::ErrorEncoder;
use serde_json::Value;
use std::sync::Arc;

/// Invokes registered procedures in-process.
///
/// `Context::call_method` delegates here, letting one system call another
/// without a network round trip. Shared across calls; must be thread-safe.
pub trait MethodDispatch: Send + Sync {
    fn call_method(
        &self,
        ctx: &mut Context,
        method: &str,
        payload: Value,
        binary: Option<Vec<u8>>,
    ) -> Result<Value, ResolveError>;

    /// Encoder used when remodeling finalization failures
    fn error_encoder(&self) -> &dyn ErrorEncoder;
}

/// Dispatcher with no methods, for contexts created outside a server
pub struct DetachedDispatch {
    encoder: Arc<dyn ErrorEncoder>,
}

impl DetachedDispatch {
    pub fn new(encoder: Arc<dyn ErrorEncoder>) -> Self {
        Self { encoder }
    }
}

impl MethodDispatch for DetachedDispatch {
    fn call_method(
        &self,
        _ctx: &mut Context,
        method: &str,
        _payload: Value,
        _binary: Option<Vec<u8>>,
    ) -> Result<Value, ResolveError> {
        Err(RpcError::method_not_found()
            .with_debug(self.encoder.encode(&format!("no dispatcher for {}", method)))
            .into())
    }

    fn error_encoder(&self) -> &dyn ErrorEncoder {
        self.encoder.as_ref()
    }
}
