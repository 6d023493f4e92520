// Shared call failure handle

use super::RpcError;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// A failure raised while serving a call.
///
/// Clones share one allocation, so identity survives propagation: the error
/// handed to `Context::finalize` can be recognised again with [`same_as`].
///
/// [`same_as`]: CallError::same_as
#[derive(Clone)]
pub struct CallError(Arc<dyn StdError + Send + Sync + 'static>);

impl CallError {
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(err))
    }

    /// Plain message failure
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    /// Reference identity, not value equality
    pub fn same_as(&self, other: &CallError) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// The protocol error, if this failure already is one
    pub fn as_rpc(&self) -> Option<&RpcError> {
        self.downcast_ref::<RpcError>()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Debug for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl StdError for CallError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<RpcError> for CallError {
    fn from(err: RpcError) -> Self {
        Self::new(err)
    }
}

impl From<std::io::Error> for CallError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err)
    }
}

#[derive(Debug)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for MessageError {}
