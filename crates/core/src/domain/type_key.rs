// Type identity used as the slot key of a resolution context

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a resolvable type.
///
/// Equality and hashing use the `TypeId` only; the name is carried for
/// diagnostics (recursion chains, duplicate registration messages).
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of `T`. Works for records (`TypeKey::of::<Db>()`) and for
    /// capabilities (`TypeKey::of::<dyn Clock>()`).
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
