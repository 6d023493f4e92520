// Domain Layer - Type identities and the protocol error model

pub mod call_error;
pub mod rpc_error;
pub mod type_key;

// Re-exports
pub use call_error::CallError;
pub use rpc_error::{code, ErrorData, RpcError};
pub use type_key::TypeKey;
