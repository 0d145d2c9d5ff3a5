//! String interning for type and callable names.
//!
//! Uses `lasso::ThreadedRodeo` so one interner can be shared by parallel
//! analysis workers.

use lasso::ThreadedRodeo;

use super::identifiers::{CallableId, TypeId};

/// Type-name interner that normalizes fully-qualified names before interning.
///
/// Surrounding whitespace and a leading namespace separator are dropped, so
/// `\App\FooException` and `App\FooException` intern to the same id.
pub struct TypeInterner {
    types: ThreadedRodeo,
    callables: ThreadedRodeo,
}

impl TypeInterner {
    /// Create a new interner.
    pub fn new() -> Self {
        Self {
            types: ThreadedRodeo::default(),
            callables: ThreadedRodeo::default(),
        }
    }

    /// Intern a type name, normalizing it first.
    pub fn intern(&self, name: &str) -> TypeId {
        TypeId::new(self.types.get_or_intern(Self::normalize(name)))
    }

    /// Look up a previously interned type name without inserting.
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.types.get(Self::normalize(name)).map(TypeId::new)
    }

    /// Resolve a `TypeId` back to its name.
    pub fn resolve(&self, id: TypeId) -> &str {
        self.types.resolve(&id.inner())
    }

    /// Intern a callable name (`fn`, `Class::method`, `{closure}@12`).
    pub fn intern_callable(&self, name: &str) -> CallableId {
        CallableId::new(self.callables.get_or_intern(name.trim()))
    }

    /// Intern a qualified method name (`Class::method`).
    pub fn intern_method(&self, class: &str, method: &str) -> CallableId {
        let qualified = format!("{}::{}", Self::normalize(class), method);
        CallableId::new(self.callables.get_or_intern(qualified))
    }

    /// Look up a previously interned callable without inserting.
    pub fn get_callable(&self, name: &str) -> Option<CallableId> {
        self.callables.get(name.trim()).map(CallableId::new)
    }

    /// Resolve a `CallableId` back to its name.
    pub fn resolve_callable(&self, id: CallableId) -> &str {
        self.callables.resolve(&id.inner())
    }

    /// Number of distinct type names interned.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Trim whitespace and a leading `\`.
    fn normalize(name: &str) -> &str {
        name.trim().trim_start_matches('\\')
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}
