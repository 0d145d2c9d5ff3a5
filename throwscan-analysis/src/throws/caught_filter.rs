//! Removal of locally caught exception types.

use crate::ast::ScopeChain;
use crate::provider::{SiteContext, TypeProvider};
use crate::types::TypeSet;

use super::handlers::caught_type_sets;

/// The part of `candidate` that escapes every enclosing catch clause.
///
/// A type is caught when its expansion can be cast to the caught types of
/// any single clause of any enclosing handler. Clause order carries no
/// meaning. Pure in `(candidate, chain)`: applying it twice with the same
/// chain gives the same result as applying it once.
pub fn without_caught(
    candidate: &TypeSet,
    chain: ScopeChain<'_>,
    ctx: &SiteContext<'_>,
    types: &dyn TypeProvider,
) -> TypeSet {
    let mut escaping = candidate.clone();
    if escaping.is_empty() {
        return escaping;
    }
    for caught in caught_type_sets(chain, ctx, types) {
        escaping.retain(|ty| !TypeSet::of(ty).is_covered_by(&caught, types));
        if escaping.is_empty() {
            break;
        }
    }
    escaping
}
