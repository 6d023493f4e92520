// Application Layer - Resolution context and the stock provider

pub mod context;
pub mod factory_provider;

// Re-exports
pub use context::{CallScope, Context};
pub use factory_provider::FactoryProvider;
