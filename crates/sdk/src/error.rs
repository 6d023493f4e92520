//! SDK Error Types

use rpcscope_core::{ErrorData, RpcError};
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error object returned by the server, `data` decoded
    #[error("RPC error: {0}")]
    Rpc(RpcError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl SdkError {
    pub fn as_rpc(&self) -> Option<&RpcError> {
        match self {
            SdkError::Rpc(rpc) => Some(rpc),
            _ => None,
        }
    }
}

impl From<jsonrpsee::core::ClientError> for SdkError {
    fn from(e: jsonrpsee::core::ClientError) -> Self {
        match e {
            jsonrpsee::core::ClientError::Call(call_err) => {
                let data = call_err
                    .data()
                    .and_then(|raw| serde_json::from_str::<ErrorData>(raw.get()).ok());
                SdkError::Rpc(RpcError {
                    code: call_err.code(),
                    message: call_err.message().to_string(),
                    data,
                })
            }
            jsonrpsee::core::ClientError::Transport(e) => {
                SdkError::Transport(format!("Transport error: {}", e))
            }
            jsonrpsee::core::ClientError::RestartNeeded(_) => {
                SdkError::Connection("Connection restart needed".to_string())
            }
            jsonrpsee::core::ClientError::ParseError(e) => {
                SdkError::Other(format!("Parse error: {}", e))
            }
            _ => SdkError::Other(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonrpsee::types::ErrorObjectOwned;

    #[test]
    fn test_call_error_decodes_data() {
        let data = ErrorData {
            debug: Some("ref:abc".to_string()),
            details: vec![RpcError::unauthenticated()],
        };
        let obj = ErrorObjectOwned::owned(-32603, "Internal error", Some(data.clone()));

        let err = SdkError::from(jsonrpsee::core::ClientError::Call(obj));
        let rpc = err.as_rpc().unwrap();
        assert_eq!(rpc.code, -32603);
        assert_eq!(rpc.data, Some(data));
    }

    #[test]
    fn test_call_error_without_data() {
        let obj = ErrorObjectOwned::owned(-32601, "Method not found", None::<()>);
        let err = SdkError::from(jsonrpsee::core::ClientError::Call(obj));
        assert_eq!(err.as_rpc(), Some(&RpcError::method_not_found()));
    }
}
