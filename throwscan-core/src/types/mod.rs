//! Shared data structures and string interning.
//! FxHashMap, SmallVec, lasso-based interning, Spur-based ID types.

pub mod collections;
pub mod identifiers;
pub mod interning;

pub use collections::FxHashMap;
pub use identifiers::{CallableId, TypeId};
pub use interning::TypeInterner;
