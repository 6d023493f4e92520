//! RPC Error Types
//!
//! Maps call failures to JSON-RPC error objects.

use jsonrpsee::types::ErrorObjectOwned;
use rpcscope_core::port::ErrorEncoder;
use rpcscope_core::{CallError, FatalError, RpcError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid method name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Method already registered: {0}")]
    Duplicate(String),
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to build server on {addr}: {reason}")]
    Build { addr: String, reason: String },

    #[error("Failed to register method {method}: {reason}")]
    Register { method: String, reason: String },
}

/// Convert the error returned by `Context::finalize` to a JSON-RPC error
/// object. Anything that is not a protocol error is hidden behind the
/// encoder.
pub fn to_error_object(err: &CallError, encoder: &dyn ErrorEncoder) -> ErrorObjectOwned {
    let rpc = match err.as_rpc() {
        Some(rpc) => rpc.clone(),
        None => RpcError::internal().with_debug(encoder.encode(&err.to_string())),
    };
    ErrorObjectOwned::owned(rpc.code, rpc.message, rpc.data)
}

/// Client-safe stand-in for a programming error
pub fn fatal_to_call_error(fatal: &FatalError, encoder: &dyn ErrorEncoder) -> CallError {
    RpcError::internal()
        .with_debug(encoder.encode(&fatal.to_string()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpcscope_core::port::PlainEncoder;
    use rpcscope_core::ErrorData;

    #[test]
    fn test_rpc_error_keeps_code_and_data() {
        let err: CallError = RpcError::internal()
            .clone_with_data(ErrorData {
                debug: Some("summary".to_string()),
                details: vec![RpcError::unauthorized()],
            })
            .into();

        let obj = to_error_object(&err, &PlainEncoder);
        assert_eq!(obj.code(), rpcscope_core::domain::code::INTERNAL_ERROR);
        let data: ErrorData = serde_json::from_str(obj.data().unwrap().get()).unwrap();
        assert_eq!(data.debug.as_deref(), Some("summary"));
        assert_eq!(data.details, vec![RpcError::unauthorized()]);
    }

    #[test]
    fn test_plain_error_becomes_internal() {
        let obj = to_error_object(&CallError::msg("disk full"), &PlainEncoder);
        assert_eq!(obj.code(), rpcscope_core::domain::code::INTERNAL_ERROR);
        assert!(obj.data().unwrap().get().contains("disk full"));
    }

    #[test]
    fn test_fatal_is_internal() {
        let fatal = FatalError::AlreadyStored { type_name: "Db" };
        let err = fatal_to_call_error(&fatal, &PlainEncoder);
        let rpc = err.as_rpc().unwrap();
        assert_eq!(rpc.code, rpcscope_core::domain::code::INTERNAL_ERROR);
        assert!(rpc.debug().unwrap().contains("already stored"));
    }
}
