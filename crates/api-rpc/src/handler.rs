//! RPC Call Handler
//!
//! Runs one inbound call: root context, dispatch, finalize, error mapping.

use crate::error::{fatal_to_call_error, to_error_object};
use crate::registry::MethodRegistry;
use jsonrpsee::types::ErrorObjectOwned;
use rpcscope_core::port::{MethodDispatch, Provider, RequestScope};
use rpcscope_core::{Context, ResolveError};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    registry: Arc<MethodRegistry>,
    provider: Arc<dyn Provider>,
    call_timeout: Duration,
}

impl RpcHandler {
    pub fn new(
        registry: Arc<MethodRegistry>,
        provider: Arc<dyn Provider>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            provider,
            call_timeout,
        }
    }

    pub fn registry(&self) -> &Arc<MethodRegistry> {
        &self.registry
    }

    /// Serve `method` in a fresh context.
    ///
    /// Whatever happens, the context is finalized before answering, and the
    /// client receives at most one error. The call's scope is cancelled once
    /// the answer is ready, so anything still holding its `done()` signal is
    /// released.
    pub fn invoke(&self, method: &str, payload: Value) -> Result<Value, ErrorObjectOwned> {
        let (scope, cancel) = RequestScope::new();
        let scope = scope.with_timeout(self.call_timeout);
        let mut ctx = Context::new(
            Arc::new(scope),
            Arc::clone(&self.provider),
            Arc::clone(&self.registry) as Arc<dyn MethodDispatch>,
        );

        let (result, err) = match ctx.call_method(method, payload, None) {
            Ok(value) => (value, None),
            Err(ResolveError::Failed(err)) => (Value::Null, Some(err)),
            Err(ResolveError::Fatal(fatal)) => {
                error!(method, error = %fatal, "Programming error while serving call");
                (
                    Value::Null,
                    Some(fatal_to_call_error(&fatal, self.registry.error_encoder())),
                )
            }
        };

        let response = match ctx.finalize(err) {
            None => Ok(result),
            Some(err) => {
                debug!(method, error = %err, "Call failed");
                Err(to_error_object(&err, self.registry.error_encoder()))
            }
        };

        cancel.cancel();
        response
    }
}

/// Extract the payload from JSON-RPC params.
///
/// A single positional argument is the payload itself; named params are
/// passed as the object; no params become `null`.
pub fn payload_from_params(params: Value) -> Value {
    match params {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        Value::Array(items) if items.is_empty() => Value::Null,
        other => other,
    }
}
