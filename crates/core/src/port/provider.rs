// Provider Port - instantiates values the context has not cached yet

use crate::application::context::Context;
use crate::domain::TypeKey;
use crate::error::ResolveError;
use crate::port::{Finalize, Resolvable};
use std::any::Any;
use std::sync::Arc;

/// Produces a value for a requested type.
///
/// Shared across concurrent calls, so implementations must be thread-safe.
/// A provider may call back into `ctx.require` to build composite values.
pub trait Provider: Send + Sync {
    fn provide(&self, ctx: &mut Context, key: TypeKey) -> Result<Resolved, ResolveError>;
}

/// A value ready to be placed in a context slot.
///
/// Always holds an `Arc<T>` of a [`Resolvable`] type: a record behind a
/// shared reference or a capability (`Arc<dyn Trait>`).
pub struct Resolved {
    key: TypeKey,
    value: Box<dyn Any + Send + Sync>,
    finalizer: Option<Arc<dyn Finalize>>,
}

impl Resolved {
    pub fn new<T>(value: Arc<T>) -> Self
    where
        T: ?Sized + Resolvable,
    {
        Self {
            key: TypeKey::of::<T>(),
            value: Box::new(value),
            finalizer: None,
        }
    }

    /// Value whose own `Finalize` impl runs at teardown
    pub fn finalizing<T>(value: Arc<T>) -> Self
    where
        T: Finalize + Resolvable,
    {
        let finalizer: Arc<dyn Finalize> = value.clone();
        Self {
            key: TypeKey::of::<T>(),
            value: Box::new(value),
            finalizer: Some(finalizer),
        }
    }

    /// Value with a separate teardown hook, e.g. a capability object whose
    /// concrete type implements `Finalize`
    pub fn with_finalizer<T>(value: Arc<T>, finalizer: Arc<dyn Finalize>) -> Self
    where
        T: ?Sized + Resolvable,
    {
        Self {
            key: TypeKey::of::<T>(),
            value: Box::new(value),
            finalizer: Some(finalizer),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn has_finalizer(&self) -> bool {
        self.finalizer.is_some()
    }

    pub(crate) fn finalizer(&self) -> Option<&Arc<dyn Finalize>> {
        self.finalizer.as_ref()
    }

    pub(crate) fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Resolvable,
    {
        (*self.value).downcast_ref::<Arc<T>>().cloned()
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("key", &self.key)
            .field("finalizer", &self.finalizer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CallError;

    struct Db;
    impl Resolvable for Db {}

    trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }
    impl Resolvable for dyn Clock {}

    struct Fixed;
    impl Resolvable for Fixed {}

    impl Clock for Fixed {
        fn now(&self) -> u64 {
            7
        }
    }

    struct Tx;
    impl Resolvable for Tx {}

    impl Finalize for Tx {
        fn finalize(&self, _prior: &[CallError]) -> Result<(), CallError> {
            Ok(())
        }
    }

    #[test]
    fn test_record_roundtrip_keeps_instance() {
        let db = Arc::new(Db);
        let resolved = Resolved::new(db.clone());
        assert_eq!(resolved.key(), TypeKey::of::<Db>());
        assert!(Arc::ptr_eq(&resolved.downcast::<Db>().unwrap(), &db));
        assert!(!resolved.has_finalizer());
    }

    #[test]
    fn test_capability_keyed_by_trait() {
        let clock: Arc<dyn Clock> = Arc::new(Fixed);
        let resolved = Resolved::new(clock);
        assert_eq!(resolved.key(), TypeKey::of::<dyn Clock>());
        assert_eq!(resolved.downcast::<dyn Clock>().unwrap().now(), 7);
        assert!(resolved.downcast::<Fixed>().is_none());
    }

    #[test]
    fn test_finalizing_attaches_capability() {
        let resolved = Resolved::finalizing(Arc::new(Tx));
        assert!(resolved.has_finalizer());
        assert_eq!(resolved.key(), TypeKey::of::<Tx>());
    }
}
