//! Request-scoped Resolution Context
//!
//! One `Context` lives for exactly one call. It lazily instantiates typed
//! dependencies through a shared [`Provider`], caches them in ordered slots,
//! detects cyclic resolution, and tears everything down in reverse order on
//! [`Context::finalize`].
//!
//! # Example
//! ```text
//! let mut ctx = Context::new(Arc::new(scope), provider, dispatcher);
//! let session = ctx.require::<Session>()?;   // provider runs once
//! let again = ctx.require::<Session>()?;     // cached instance
//! let err = ctx.finalize(None);              // reverse-order cleanup
//! ```

mod call_scope;
mod finalize;
mod store;


pub use call_scope::CallScope;
pub use finalize::remodel;

use crate::domain::TypeKey;
use crate::error::ResolveError;
use crate::port::{
    CancelSignal, ErrorEncoder, MethodDispatch, Provider, Resolved, Scope, ScopeError,
};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Per-call dependency container
pub struct Context {
    scope: Arc<CallScope>,
    provider: Arc<dyn Provider>,
    dispatcher: Arc<dyn MethodDispatch>,
    slots: Vec<Slot>,
    finalized: bool,
}

/// One type's reservation or cached value.
///
/// `resolved` is `None` while the provider for `key` is still running.
struct Slot {
    key: TypeKey,
    resolved: Option<Resolved>,
}

impl Slot {
    fn reserved(key: TypeKey) -> Self {
        Self {
            key,
            resolved: None,
        }
    }

    fn valid(resolved: Resolved) -> Self {
        Self {
            key: resolved.key(),
            resolved: Some(resolved),
        }
    }

    fn is_valid(&self) -> bool {
        self.resolved.is_some()
    }
}

impl Context {
    /// Root context for an inbound call
    pub fn new(
        parent: Arc<dyn Scope>,
        provider: Arc<dyn Provider>,
        dispatcher: Arc<dyn MethodDispatch>,
    ) -> Self {
        Self::with_scope(Arc::new(CallScope::root(parent)), provider, dispatcher)
    }

    fn with_scope(
        scope: Arc<CallScope>,
        provider: Arc<dyn Provider>,
        dispatcher: Arc<dyn MethodDispatch>,
    ) -> Self {
        let own_scope = Slot::valid(Resolved::new(Arc::clone(&scope)));
        Self {
            scope,
            provider,
            dispatcher,
            slots: vec![own_scope],
            finalized: false,
        }
    }

    /// Child context for a nested call.
    ///
    /// Shares provider and dispatcher, starts with an empty store and uses
    /// this context as its cancellation parent.
    pub fn fork(&self) -> Context {
        Self::with_scope(
            Arc::new(CallScope::child(Arc::clone(&self.scope))),
            Arc::clone(&self.provider),
            Arc::clone(&self.dispatcher),
        )
    }

    /// Invoke a registered procedure in-process through the dispatcher
    pub fn call_method(
        &mut self,
        method: &str,
        payload: Value,
        binary: Option<Vec<u8>>,
    ) -> Result<Value, ResolveError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        dispatcher.call_method(self, method, payload, binary)
    }

    pub fn error_encoder(&self) -> &dyn ErrorEncoder {
        self.dispatcher.error_encoder()
    }

    pub fn call_scope(&self) -> &Arc<CallScope> {
        &self.scope
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Names of all slots in acquisition order (reserved ones included)
    pub fn resolved_types(&self) -> Vec<&'static str> {
        self.slots.iter().map(|slot| slot.key.name()).collect()
    }

    /// Whether a valid value for `T` is cached
    pub fn is_resolved<T: ?Sized + 'static>(&self) -> bool {
        let key = TypeKey::of::<T>();
        self.slots
            .iter()
            .any(|slot| slot.key == key && slot.is_valid())
    }
}

impl Scope for Context {
    fn deadline(&self) -> Option<Instant> {
        self.scope.deadline()
    }

    fn done(&self) -> CancelSignal {
        self.scope.done()
    }

    fn err(&self) -> Option<ScopeError> {
        self.scope.err()
    }

    fn value(&self, key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.scope.value(key)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        let pending = self
            .slots
            .iter()
            .filter(|slot| {
                slot.resolved
                    .as_ref()
                    .is_some_and(|resolved| resolved.has_finalizer())
            })
            .count();
        if !self.finalized && pending > 0 {
            warn!(
                pending_finalizers = pending,
                depth = self.scope.depth(),
                "Context dropped without finalize"
            );
        }
    }
}
