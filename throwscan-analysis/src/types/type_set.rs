//! The `TypeSet` value type and its algebra.
//!
//! A `TypeSet` is an unordered set of [`Type`]s. Duplicates collapse and two
//! sets compare equal regardless of insertion order. Storage keeps first
//! insertion order so that anything derived from a set (diagnostics, rendered
//! strings) comes out deterministically.

use serde::{Deserialize, Serialize};
use throwscan_core::types::collections::SmallVec4;

use super::Type;
use crate::provider::TypeProvider;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSet {
    types: SmallVec4<Type>,
}

impl TypeSet {
    /// The empty set. For the analysis this means "nothing more to report".
    pub fn empty() -> Self {
        Self::default()
    }

    /// A set holding exactly one type.
    pub fn of(ty: Type) -> Self {
        let mut set = Self::empty();
        set.insert(ty);
        set
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn contains(&self, ty: Type) -> bool {
        self.types.contains(&ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = Type> + '_ {
        self.types.iter().copied()
    }

    /// Add a type; returns false if it was already present.
    pub fn insert(&mut self, ty: Type) -> bool {
        if self.contains(ty) {
            return false;
        }
        self.types.push(ty);
        true
    }

    /// Set union. Idempotent and commutative up to set equality.
    pub fn union(&self, other: &TypeSet) -> TypeSet {
        let mut out = self.clone();
        out.extend(other.iter());
        out
    }

    /// This set with one type removed.
    pub fn without(&self, ty: Type) -> TypeSet {
        self.iter().filter(|t| *t != ty).collect()
    }

    /// Keep only the types for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(Type) -> bool) {
        self.types.retain(|ty| keep(*ty));
    }

    /// True iff the expansion of every member can be cast to `target` as a
    /// whole. Vacuously true for the empty set.
    pub fn is_covered_by(&self, target: &TypeSet, provider: &dyn TypeProvider) -> bool {
        self.iter()
            .all(|ty| provider.can_cast(&provider.expand(ty), target))
    }

    /// Render as `A|?B` using the provider's names.
    pub fn render(&self, provider: &dyn TypeProvider) -> String {
        self.iter()
            .map(|ty| {
                let name = provider.type_name(ty.id());
                if ty.is_nullable() {
                    format!("?{name}")
                } else {
                    name.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl PartialEq for TypeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl Eq for TypeSet {}

impl FromIterator<Type> for TypeSet {
    fn from_iter<I: IntoIterator<Item = Type>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl Extend<Type> for TypeSet {
    fn extend<I: IntoIterator<Item = Type>>(&mut self, iter: I) {
        for ty in iter {
            self.insert(ty);
        }
    }
}

impl From<Type> for TypeSet {
    fn from(ty: Type) -> Self {
        Self::of(ty)
    }
}
