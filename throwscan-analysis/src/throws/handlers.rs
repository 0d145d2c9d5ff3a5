//! Enclosing exception handlers of a site.

use crate::ast::{ScopeChain, ScopeMarker, TryStmt};
use crate::provider::{SiteContext, TypeProvider};
use crate::types::TypeSet;

/// Try statements enclosing the site, innermost first.
///
/// A site anywhere inside a try statement counts as enclosed by it: the
/// protected body, any of its catch blocks, or its finally block. So a
/// `throw $e` re-raising a caught exception is covered by its own clause.
/// The search stops at the innermost function-like root.
pub fn enclosing_handlers<'a>(chain: ScopeChain<'a>) -> impl Iterator<Item = &'a TryStmt> {
    chain.within_function().filter_map(|marker| match marker {
        ScopeMarker::TryBody(stmt)
        | ScopeMarker::CatchBody(stmt, _)
        | ScopeMarker::FinallyBody(stmt) => Some(stmt),
        ScopeMarker::FunctionRoot(_) => None,
    })
}

/// Caught types of every enclosing catch clause, innermost handler first and
/// clauses in declaration order. Clauses whose types cannot be inferred
/// yield an empty set.
pub fn caught_type_sets<'a>(
    chain: ScopeChain<'a>,
    ctx: &'a SiteContext<'a>,
    types: &'a dyn TypeProvider,
) -> impl Iterator<Item = TypeSet> + 'a {
    enclosing_handlers(chain).flat_map(move |stmt| {
        stmt.catches
            .iter()
            .map(move |clause| types.infer_catch_clause_type(clause, ctx))
    })
}
