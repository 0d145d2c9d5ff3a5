//! Resolved callables and their exception contracts.

use serde::{Deserialize, Serialize};
use throwscan_core::types::CallableId;

use crate::types::TypeSet;

/// A resolved function, method, static method, or closure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Callable {
    pub id: CallableId,
    /// Display name (`fn`, `Class::method`, `{closure}`).
    pub name: String,
}

impl Callable {
    pub fn new(id: CallableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// How a method name is looked up on its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodLookup {
    /// `$obj->m()`: non-static lookup on the receiver's types.
    Instance,
    /// `C::m()`. When `forgiving`, an ambiguous or partial match resolves to
    /// its first candidate instead of failing.
    Static { forgiving: bool },
}

/// What a callable declares it may throw.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExceptionContract {
    /// No declaration at all.
    #[default]
    Undeclared,
    /// Declared to throw exactly these types. May be empty.
    Declared(TypeSet),
}

impl ExceptionContract {
    pub fn is_declared(&self) -> bool {
        matches!(self, Self::Declared(_))
    }

    pub fn declared(&self) -> Option<&TypeSet> {
        match self {
            Self::Declared(types) => Some(types),
            Self::Undeclared => None,
        }
    }

    /// The contract as the candidate set of a call site. Undeclared callees
    /// contribute nothing.
    pub fn candidates(&self) -> TypeSet {
        self.declared().cloned().unwrap_or_default()
    }
}
