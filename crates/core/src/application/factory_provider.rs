// Factory Provider - closure-per-type Provider implementation

use crate::application::context::Context;
use crate::domain::{RpcError, TypeKey};
use crate::error::ResolveError;
use crate::port::{Finalize, Provider, Resolvable, Resolved};
use std::collections::HashMap;
use std::sync::Arc;

type Factory = Box<dyn Fn(&mut Context) -> Result<Resolved, ResolveError> + Send + Sync>;

/// Provider backed by one factory closure per type.
///
/// Factories receive the requesting context and may `require` further
/// values from it. Registration happens at startup; afterwards the provider
/// is shared read-only across calls.
///
/// # Example
/// ```text
/// let mut provider = FactoryProvider::new();
/// provider
///     .register::<Db, _>(|_| Ok(Arc::new(Db::connect()?)))
///     .register_finalizing::<Session, _>(|ctx| Ok(Arc::new(Session::open(ctx.require::<Db>()?))));
/// ```
#[derive(Default)]
pub struct FactoryProvider {
    factories: HashMap<TypeKey, Factory>,
}

impl FactoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain value factory for `T`
    pub fn register<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Resolvable,
        F: Fn(&mut Context) -> Result<Arc<T>, ResolveError> + Send + Sync + 'static,
    {
        self.register_resolved(TypeKey::of::<T>(), move |ctx| {
            factory(ctx).map(Resolved::new)
        })
    }

    /// Register a factory for a value that must be finalized at call end
    pub fn register_finalizing<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Finalize + Resolvable,
        F: Fn(&mut Context) -> Result<Arc<T>, ResolveError> + Send + Sync + 'static,
    {
        self.register_resolved(TypeKey::of::<T>(), move |ctx| {
            factory(ctx).map(Resolved::finalizing)
        })
    }

    /// Register a raw factory. The returned value must be keyed by `key`,
    /// otherwise `require` fails fatally.
    pub fn register_resolved<F>(&mut self, key: TypeKey, factory: F) -> &mut Self
    where
        F: Fn(&mut Context) -> Result<Resolved, ResolveError> + Send + Sync + 'static,
    {
        self.factories.insert(key, Box::new(factory));
        self
    }

    pub fn provides(&self, key: TypeKey) -> bool {
        self.factories.contains_key(&key)
    }
}

impl Provider for FactoryProvider {
    fn provide(&self, ctx: &mut Context, key: TypeKey) -> Result<Resolved, ResolveError> {
        match self.factories.get(&key) {
            Some(factory) => factory(ctx),
            None => {
                let debug = ctx
                    .error_encoder()
                    .encode(&format!("no provider registered for {}", key));
                Err(RpcError::internal().with_debug(debug).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{DetachedDispatch, PlainEncoder, RequestScope};

    #[derive(Debug)]
    struct Db;
    impl Resolvable for Db {}

    #[test]
    fn test_unknown_type_is_internal_error() {
        let (scope, _cancel) = RequestScope::new();
        let mut ctx = Context::new(
            Arc::new(scope),
            Arc::new(FactoryProvider::new()),
            Arc::new(DetachedDispatch::new(Arc::new(PlainEncoder))),
        );

        let err = ctx.require::<Db>().unwrap_err();
        let rpc = err.as_failure().and_then(|e| e.as_rpc()).unwrap();
        assert_eq!(rpc.code, crate::domain::code::INTERNAL_ERROR);
        assert!(rpc.debug().unwrap().contains("Db"));
    }

    #[test]
    fn test_provides() {
        let mut provider = FactoryProvider::new();
        provider.register::<Db, _>(|_| Ok(Arc::new(Db)));
        assert!(provider.provides(TypeKey::of::<Db>()));
        assert!(!provider.provides(TypeKey::of::<String>()));
    }
}
