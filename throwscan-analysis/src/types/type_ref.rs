//! Nominal type references.

use serde::{Deserialize, Serialize};
use throwscan_core::types::TypeId;

/// A nominal reference to a class, interface, or builtin type.
///
/// Identity is the interned name plus the nullable qualifier. Whether one
/// type can stand in for another is never decided here; that belongs to the
/// type provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    id: TypeId,
    nullable: bool,
}

impl Type {
    pub fn new(id: TypeId) -> Self {
        Self { id, nullable: false }
    }

    pub fn nullable(id: TypeId) -> Self {
        Self { id, nullable: true }
    }

    pub fn id(self) -> TypeId {
        self.id
    }

    pub fn is_nullable(self) -> bool {
        self.nullable
    }

    /// The same type with the nullable qualifier removed.
    pub fn non_null(self) -> Self {
        Self::new(self.id)
    }
}

impl From<TypeId> for Type {
    fn from(id: TypeId) -> Self {
        Self::new(id)
    }
}
