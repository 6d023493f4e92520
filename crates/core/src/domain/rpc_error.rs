// Protocol Error (JSON-RPC 2.0 error object)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON-RPC error codes
pub mod code {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const UNAUTHENTICATED: i32 = -32001;
    pub const UNAUTHORIZED: i32 = -32002;
}

/// Error object sent to clients.
///
/// Serializes as `{ "code", "message", "data"?: { "debug"?, "details"? } }`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message} ({code})")]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

/// Optional error payload: encoded diagnostics and nested errors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<RpcError>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse() -> Self {
        Self::new(code::PARSE_ERROR, "Parse error")
    }

    pub fn invalid_request() -> Self {
        Self::new(code::INVALID_REQUEST, "Invalid Request")
    }

    pub fn method_not_found() -> Self {
        Self::new(code::METHOD_NOT_FOUND, "Method not found")
    }

    pub fn invalid_params() -> Self {
        Self::new(code::INVALID_PARAMS, "Invalid params")
    }

    pub fn internal() -> Self {
        Self::new(code::INTERNAL_ERROR, "Internal error")
    }

    pub fn unauthenticated() -> Self {
        Self::new(code::UNAUTHENTICATED, "Unauthenticated")
    }

    pub fn unauthorized() -> Self {
        Self::new(code::UNAUTHORIZED, "Unauthorized")
    }

    /// Copy of this error with `data` replaced
    pub fn clone_with_data(&self, data: ErrorData) -> Self {
        Self {
            code: self.code,
            message: self.message.clone(),
            data: Some(data),
        }
    }

    /// Shorthand for an error whose data only carries a debug string
    pub fn with_debug(&self, debug: impl Into<String>) -> Self {
        self.clone_with_data(ErrorData {
            debug: Some(debug.into()),
            details: Vec::new(),
        })
    }

    pub fn debug(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.debug.as_deref())
    }

    pub fn details(&self) -> &[RpcError] {
        self.data.as_ref().map(|d| d.details.as_slice()).unwrap_or(&[])
    }
}
