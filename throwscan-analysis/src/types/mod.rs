//! Exception types and sets of them.

pub mod type_ref;
pub mod type_set;

pub use type_ref::Type;
pub use type_set::TypeSet;
