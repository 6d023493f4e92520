// Central Error Types for the Resolution Context

use crate::domain::{CallError, RpcError};
use thiserror::Error;

/// Programming errors raised by the resolution context.
///
/// These never happen in correct code. They are kept apart from
/// [`CallError`] so ordinary error handling cannot swallow them by accident:
/// transports log them with their full diagnostic and answer with an
/// internal error.
#[derive(Error, Debug, Clone)]
pub enum FatalError {
    #[error("value of type {type_name} is already stored")]
    AlreadyStored { type_name: &'static str },

    #[error("context is already finalized (accessing {type_name})")]
    Finalized { type_name: &'static str },

    #[error("provider returned {found} while resolving {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error(
        "recursion loop while resolving {type_name}:\n-----------\n{}\n-----------\n{stack}",
        .chain.join("\n--> ")
    )]
    RecursionLoop {
        type_name: &'static str,
        /// Unresolved types in acquisition order, closed by the requested type
        chain: Vec<&'static str>,
        stack: String,
    },
}

/// Error returned from `require`, providers and method handlers
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    #[error("fatal: {0}")]
    Fatal(#[from] FatalError),

    /// Recoverable failure, propagated exactly as the provider produced it
    #[error(transparent)]
    Failed(CallError),
}

impl ResolveError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::Fatal(_))
    }

    /// The recoverable failure, if this is not a programming error
    pub fn as_failure(&self) -> Option<&CallError> {
        match self {
            ResolveError::Failed(err) => Some(err),
            ResolveError::Fatal(_) => None,
        }
    }
}

impl From<CallError> for ResolveError {
    fn from(err: CallError) -> Self {
        ResolveError::Failed(err)
    }
}

impl From<RpcError> for ResolveError {
    fn from(err: RpcError) -> Self {
        ResolveError::Failed(err.into())
    }
}

/// Result type alias using ResolveError
pub type Result<T> = std::result::Result<T, ResolveError>;
