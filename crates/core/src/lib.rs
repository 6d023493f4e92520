// rpcscope Core - Resolution Context & Ports
// NO transport dependencies (hexagonal core)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::context::{CallScope, Context};
pub use domain::{CallError, ErrorData, RpcError, TypeKey};
pub use error::{FatalError, ResolveError, Result};
pub use port::{ErrorEncoder, Finalize, MethodDispatch, Provider, Resolvable, Resolved, Scope};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
