// Scope node owned by each context

use crate::port::{CancelSignal, Resolvable, Scope, ScopeError};
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

/// Cancellation view of one context.
///
/// Forwards everything to its parent: the inbound request's scope for a root
/// context, the forking context's node for a fork. Every context stores its
/// own `CallScope`, so providers can `require::<CallScope>()`.
pub struct CallScope {
    parent: Arc<dyn Scope>,
    depth: usize,
}

impl CallScope {
    pub(crate) fn root(parent: Arc<dyn Scope>) -> Self {
        Self { parent, depth: 0 }
    }

    pub(crate) fn child(parent: Arc<CallScope>) -> Self {
        let depth = parent.depth + 1;
        Self { parent, depth }
    }

    /// 0 for a root context, +1 per fork
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> &Arc<dyn Scope> {
        &self.parent
    }
}

impl Resolvable for CallScope {}

impl Scope for CallScope {
    fn deadline(&self) -> Option<Instant> {
        self.parent.deadline()
    }

    fn done(&self) -> CancelSignal {
        self.parent.done()
    }

    fn err(&self) -> Option<ScopeError> {
        self.parent.err()
    }

    fn value(&self, key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.parent.value(key)
    }
}
