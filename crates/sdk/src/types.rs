//! SDK Types - results of the built-in methods

use serde::{Deserialize, Serialize};

/// rpc/ping.v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub pong: bool,
    pub version: String,
}
