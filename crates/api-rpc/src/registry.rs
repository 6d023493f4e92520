//! Method Registry
//!
//! Maps method names to handlers and routes calls to them. Implements
//! `MethodDispatch`, so the same registry serves network calls and
//! in-process calls made through `Context::call_method`.

use crate::error::RegistryError;
use crate::method_name::MethodName;
use rpcscope_core::port::{ErrorEncoder, MethodDispatch};
use rpcscope_core::{Context, ResolveError, RpcError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Handler of one method. Runs synchronously inside the call's context.
pub type Handler =
    Arc<dyn Fn(&mut Context, Value, Option<Vec<u8>>) -> Result<Value, ResolveError> + Send + Sync>;

pub struct MethodRegistry {
    methods: BTreeMap<&'static str, Handler>,
    encoder: Arc<dyn ErrorEncoder>,
}

impl MethodRegistry {
    pub fn new(encoder: Arc<dyn ErrorEncoder>) -> Self {
        Self {
            methods: BTreeMap::new(),
            encoder,
        }
    }

    /// Register a raw handler under `name` (`<system>/<method>.v<version>`)
    pub fn register<F>(&mut self, name: &'static str, handler: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(&mut Context, Value, Option<Vec<u8>>) -> Result<Value, ResolveError>
            + Send
            + Sync
            + 'static,
    {
        MethodName::parse(name)?;
        if self.methods.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.methods.insert(name, Arc::new(handler));
        debug!(method = name, "Registered method");
        Ok(self)
    }

    /// Register a handler with typed params and result.
    ///
    /// Params that do not deserialize yield `invalid params`.
    pub fn register_typed<P, R, F>(
        &mut self,
        name: &'static str,
        handler: F,
    ) -> Result<&mut Self, RegistryError>
    where
        P: DeserializeOwned,
        R: Serialize,
        F: Fn(&mut Context, P) -> Result<R, ResolveError> + Send + Sync + 'static,
    {
        let encoder = Arc::clone(&self.encoder);
        self.register(name, move |ctx, payload, _binary| {
            let params: P = serde_json::from_value(payload)
                .map_err(|e| RpcError::invalid_params().with_debug(encoder.encode(&e.to_string())))?;
            let result = handler(ctx, params)?;
            serde_json::to_value(result).map_err(|e| {
                ResolveError::from(
                    RpcError::internal().with_debug(encoder.encode(&e.to_string())),
                )
            })
        })
    }

    /// Registered names in sorted order
    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.keys().copied().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

impl MethodDispatch for MethodRegistry {
    fn call_method(
        &self,
        ctx: &mut Context,
        method: &str,
        payload: Value,
        binary: Option<Vec<u8>>,
    ) -> Result<Value, ResolveError> {
        let handler = self.methods.get(method).cloned().ok_or_else(|| {
            RpcError::method_not_found().with_debug(self.encoder.encode(method))
        })?;

        debug!(method, depth = ctx.call_scope().depth(), "Dispatching method");
        handler(ctx, payload, binary)
    }

    fn error_encoder(&self) -> &dyn ErrorEncoder {
        self.encoder.as_ref()
    }
}
