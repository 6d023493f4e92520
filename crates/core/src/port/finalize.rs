// Finalize capability for stored values

use crate::domain::CallError;

/// Optional teardown hook of a stored value.
///
/// Called exactly once when the owning context is finalized, in reverse
/// store order. `prior` holds the failures collected so far (the call's own
/// error first), e.g. so a transaction can decide between commit and
/// rollback.
pub trait Finalize: Send + Sync {
    fn finalize(&self, prior: &[CallError]) -> Result<(), CallError>;
}
