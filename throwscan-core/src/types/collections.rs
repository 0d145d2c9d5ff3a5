//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashMap;
pub use smallvec::SmallVec;

/// SmallVec sized for type sets (a thrown or caught union is usually tiny).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
