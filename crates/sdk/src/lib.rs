//! rpcscope SDK - Rust Client Library
//!
//! Calls methods on an rpcscope server and turns remodeled errors back into
//! [`RpcError`](rpcscope_core::RpcError) values, sub-errors included.
//!
//! # Example
//!
//! ```no_run
//! use rpcscope_sdk::RpcScopeClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcScopeClient::connect("http://127.0.0.1:9528").await?;
//!
//!     let pong = client.ping().await?;
//!     println!("Server version: {}", pong.version);
//!
//!     let sum: i64 = client.call("math/add.v1", json!({"a": 1, "b": 2})).await?;
//!     println!("Sum: {}", sum);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::RpcScopeClient;
pub use error::{Result, SdkError};
pub use types::PingResponse;
