// Finalization: reverse-order teardown and error remodeling

use super::Context;
use crate::domain::{CallError, ErrorData, RpcError};
use crate::port::ErrorEncoder;
use std::fmt::Write;
use tracing::{debug, warn};

impl Context {
    /// End the call.
    ///
    /// The first call finalizes every stored value from last to first,
    /// passing each the failures collected so far, releases all slots and
    /// returns the remodeled error. Later calls do nothing and return `err`.
    pub fn finalize(&mut self, err: Option<CallError>) -> Option<CallError> {
        if self.finalized {
            return err;
        }
        // Set first: a require during teardown must fail, not add a slot.
        self.finalized = true;

        let mut errors: Vec<CallError> = err.iter().cloned().collect();
        let mut released = 0usize;

        while let Some(slot) = self.slots.pop() {
            released += 1;
            let Some(finalizer) = slot.resolved.as_ref().and_then(|r| r.finalizer()) else {
                continue;
            };
            if let Err(e) = finalizer.finalize(&errors) {
                warn!(type_name = slot.key.name(), error = %e, "Finalizer failed");
                errors.push(e);
            }
        }

        debug!(
            released,
            failures = errors.len(),
            depth = self.scope.depth(),
            "Context finalized"
        );

        remodel(errors, err.as_ref(), self.dispatcher.error_encoder())
    }
}

/// Collapse the failures of a call into the single error sent to the client.
///
/// - none: `None`
/// - only `original` itself: `original`, untouched
/// - anything else: one internal error with an encoded summary in `debug`
///   and one entry in `details` per failure
pub fn remodel(
    errors: Vec<CallError>,
    original: Option<&CallError>,
    encoder: &dyn ErrorEncoder,
) -> Option<CallError> {
    match errors.as_slice() {
        [] => return None,
        [only] if original.is_some_and(|o| o.same_as(only)) => return Some(only.clone()),
        _ => {}
    }

    let details = errors
        .iter()
        .map(|e| match e.as_rpc() {
            Some(rpc) => rpc.clone(),
            None => RpcError::internal().with_debug(encoder.encode(&e.to_string())),
        })
        .collect();

    let remodeled = RpcError::internal().clone_with_data(ErrorData {
        debug: Some(encoder.encode(&summarize(&errors))),
        details,
    });
    Some(remodeled.into())
}

fn summarize(errors: &[CallError]) -> String {
    let mut out = format!("finalization failed with {} error(s)", errors.len());
    for (i, e) in errors.iter().enumerate() {
        let _ = write!(out, "\n{}: {}", i + 1, e);
    }
    out
}
