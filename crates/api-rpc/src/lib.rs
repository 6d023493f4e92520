//! JSON-RPC API Layer
//!
//! Wires the resolution context to a JSON-RPC 2.0 endpoint: method names of
//! the form `<system>/<method>.v<version>`, an in-process registry that also
//! serves inter-system calls, and a jsonrpsee server running every call in
//! its own context.

pub mod error;
pub mod handler;
pub mod method_name;
pub mod registry;
pub mod server;

pub use handler::RpcHandler;
pub use method_name::MethodName;
pub use registry::MethodRegistry;
pub use server::{RpcServer, RpcServerConfig};
