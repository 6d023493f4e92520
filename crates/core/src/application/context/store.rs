// Typed value store: lazy resolution, recursion guard, invalidation

use super::{Context, Slot};
use crate::domain::TypeKey;
use crate::error::{FatalError, ResolveError};
use crate::port::{Resolvable, Resolved};
use std::backtrace::Backtrace;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

impl Context {
    /// Register a pre-computed value for `T`.
    ///
    /// Fails if any slot for `T` exists, valid or still resolving. Replacing
    /// a value requires an explicit [`invalidate`](Context::invalidate) first.
    pub fn store_value<T>(&mut self, value: Arc<T>) -> Result<(), FatalError>
    where
        T: ?Sized + Resolvable,
    {
        self.store_resolved(Resolved::new(value))
    }

    /// Register a value that may carry a finalize capability
    pub fn store_resolved(&mut self, resolved: Resolved) -> Result<(), FatalError> {
        let key = resolved.key();
        if self.finalized {
            return Err(FatalError::Finalized {
                type_name: key.name(),
            });
        }
        if self.slots.iter().any(|slot| slot.key == key) {
            return Err(FatalError::AlreadyStored {
                type_name: key.name(),
            });
        }

        trace!(type_name = key.name(), "Storing value");
        self.slots.push(Slot::valid(resolved));
        Ok(())
    }

    /// Get the value for `T`, asking the provider on first use.
    ///
    /// Provider failures come back untouched. Requiring a type whose
    /// provider is still running is a cycle and fails fatally.
    pub fn require<T>(&mut self) -> Result<Arc<T>, ResolveError>
    where
        T: ?Sized + Resolvable,
    {
        let key = TypeKey::of::<T>();
        if self.finalized {
            return Err(FatalError::Finalized {
                type_name: key.name(),
            }
            .into());
        }

        if let Some(slot) = self.slots.iter().find(|slot| slot.key == key) {
            return match &slot.resolved {
                Some(resolved) => downcast(resolved, key),
                None => Err(self.recursion_loop(key).into()),
            };
        }

        // Reserve before resolving so a nested require of `T` is detected.
        self.slots.push(Slot::reserved(key));
        trace!(type_name = key.name(), "Resolving value");

        let provider = Arc::clone(&self.provider);
        let resolved = match provider.provide(self, key) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.release(key);
                debug!(type_name = key.name(), error = %err, "Provider failed");
                return Err(err);
            }
        };

        if self.finalized {
            return Err(FatalError::Finalized {
                type_name: key.name(),
            }
            .into());
        }
        if resolved.key() != key {
            self.release(key);
            return Err(FatalError::TypeMismatch {
                expected: key.name(),
                found: resolved.key().name(),
            }
            .into());
        }

        let value = downcast(&resolved, key)?;
        match self.slots.iter_mut().find(|slot| slot.key == key) {
            // The provider invalidated its own type and stored a value.
            Some(slot) if slot.is_valid() => {
                return Err(FatalError::AlreadyStored {
                    type_name: key.name(),
                }
                .into());
            }
            Some(slot) => slot.resolved = Some(resolved),
            // The provider invalidated the type it was resolving.
            None => self.slots.push(Slot::valid(resolved)),
        }
        Ok(value)
    }

    /// Drop the slots of the given types, valid or not.
    ///
    /// The next `require` of an invalidated type runs its provider again.
    /// Invalidated values are not finalized.
    pub fn invalidate(&mut self, keys: &[TypeKey]) {
        let targets: HashSet<TypeKey> = keys.iter().copied().collect();
        let before = self.slots.len();
        self.slots.retain(|slot| !targets.contains(&slot.key));

        debug!(
            requested = keys.len(),
            removed = before - self.slots.len(),
            "Invalidated values"
        );
    }

    /// Single-type shorthand for [`invalidate`](Context::invalidate)
    pub fn invalidate_type<T: ?Sized + 'static>(&mut self) {
        self.invalidate(&[TypeKey::of::<T>()]);
    }

    fn release(&mut self, key: TypeKey) {
        self.slots
            .retain(|slot| slot.key != key || slot.is_valid());
    }

    fn recursion_loop(&self, key: TypeKey) -> FatalError {
        let mut chain: Vec<&'static str> = self
            .slots
            .iter()
            .filter(|slot| !slot.is_valid())
            .map(|slot| slot.key.name())
            .collect();
        chain.push(key.name());

        FatalError::RecursionLoop {
            type_name: key.name(),
            chain,
            stack: Backtrace::force_capture().to_string(),
        }
    }
}

fn downcast<T>(resolved: &Resolved, key: TypeKey) -> Result<Arc<T>, ResolveError>
where
    T: ?Sized + Resolvable,
{
    resolved.downcast::<T>().ok_or_else(|| {
        FatalError::TypeMismatch {
            expected: key.name(),
            found: resolved.key().name(),
        }
        .into()
    })
}
