// Cancellation Scope Port - deadline, cancel signal and key lookup of a call

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::watch;

/// The cancellation-bearing parent of a resolution context.
///
/// A context never cancels by itself; it forwards these calls to its parent.
pub trait Scope: Send + Sync {
    /// Point in time after which the call should be abandoned
    fn deadline(&self) -> Option<Instant>;

    /// Signal that fires when the call is cancelled
    fn done(&self) -> CancelSignal;

    /// Why the call ended early, if it did
    fn err(&self) -> Option<ScopeError>;

    /// Arbitrary value attached by the transport (peer address, headers...)
    fn value(&self, key: &str) -> Option<Arc<dyn Any + Send + Sync>>;
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    #[error("call cancelled")]
    Cancelled,

    #[error("call deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation signal for a call
#[derive(Clone)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// Signal that never fires
    pub fn never() -> Self {
        Self { rx: None }
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Wait for cancellation. Pends forever if the sender goes away first.
    pub async fn cancelled(&mut self) {
        if let Some(rx) = self.rx.as_mut() {
            if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

/// Trigger for a [`RequestScope`]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation to the call and every context forked from it
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Root scope of one inbound call
pub struct RequestScope {
    deadline: Option<Instant>,
    cancel: watch::Receiver<bool>,
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl RequestScope {
    /// Create a scope and the handle that cancels it
    pub fn new() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let scope = Self {
            deadline: None,
            cancel: rx,
            values: HashMap::new(),
        };
        (scope, CancelHandle { tx })
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Arc<dyn Any + Send + Sync>) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

impl Scope for RequestScope {
    fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn done(&self) -> CancelSignal {
        CancelSignal {
            rx: Some(self.cancel.clone()),
        }
    }

    // Deadlines are checked lazily; `done` only reflects explicit cancellation.
    fn err(&self) -> Option<ScopeError> {
        if *self.cancel.borrow() {
            return Some(ScopeError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ScopeError::DeadlineExceeded),
            _ => None,
        }
    }

    fn value(&self, key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.values.get(key).cloned()
    }
}

/// Scope that never ends, for work not tied to an inbound call
pub struct Background;

impl Scope for Background {
    fn deadline(&self) -> Option<Instant> {
        None
    }

    fn done(&self) -> CancelSignal {
        CancelSignal::never()
    }

    fn err(&self) -> Option<ScopeError> {
        None
    }

    fn value(&self, _key: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        None
    }
}
