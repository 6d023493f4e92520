// Resolvable marker - which types a context may hold

/// Marker for the types a [`Context`](crate::Context) may store and resolve.
///
/// Implement it for records a call shares by reference, and for capability
/// traits as `dyn Trait`. Primitives, strings and collections are not
/// resolvable, so storing or requiring them is rejected at compile time.
///
/// ```
/// use rpcscope_core::port::Resolvable;
/// use rpcscope_core::Resolved;
/// use std::sync::Arc;
///
/// struct Db;
/// impl Resolvable for Db {}
///
/// trait Clock: Send + Sync {}
/// impl Resolvable for dyn Clock {}
///
/// struct Fixed;
/// impl Clock for Fixed {}
///
/// let _ = Resolved::new(Arc::new(Db));
/// let clock: Arc<dyn Clock> = Arc::new(Fixed);
/// let _ = Resolved::new(clock);
/// ```
///
/// A primitive cannot be placed in a slot:
///
/// ```compile_fail
/// use rpcscope_core::Resolved;
/// use std::sync::Arc;
///
/// let _ = Resolved::new(Arc::new(7u64));
/// ```
///
/// nor requested from a context:
///
/// ```compile_fail
/// use rpcscope_core::Context;
///
/// fn counter(ctx: &mut Context) {
///     let _ = ctx.require::<u64>();
/// }
/// ```
///
/// nor stored directly:
///
/// ```compile_fail
/// use rpcscope_core::Context;
/// use std::sync::Arc;
///
/// fn name(ctx: &mut Context) {
///     let _ = ctx.store_value(Arc::new(String::from("x")));
/// }
/// ```
pub trait Resolvable: Send + Sync + 'static {}
