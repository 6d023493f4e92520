// Port Layer - Interfaces the resolution context consumes

pub mod error_encoder;
pub mod finalize;
pub mod method_dispatch;
pub mod provider;
pub mod resolvable;
pub mod scope;

// Re-exports
pub use error_encoder::{ErrorEncoder, PlainEncoder, ReferenceEncoder};
pub use finalize::Finalize;
pub use method_dispatch::{DetachedDispatch, MethodDispatch};
pub use provider::{Provider, Resolved};
pub use resolvable::Resolvable;
pub use scope::{Background, CancelHandle, CancelSignal, RequestScope, Scope, ScopeError};
