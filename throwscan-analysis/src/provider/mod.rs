//! Collaborator interfaces consumed by the analysis.
//!
//! The analysis never infers types, resolves calls, or parses declarations
//! itself. Hosts implement [`TypeProvider`] and [`CallableProvider`] over
//! whatever program model they have; [`crate::codebase::Codebase`] is an
//! in-memory implementation.
//!
//! "Cannot determine" is never an error here. Type inference answers with an
//! empty [`TypeSet`] and resolution answers with an [`AbstainReason`]; either
//! way the site is skipped.

pub mod callable;
pub mod context;

pub use callable::{Callable, ExceptionContract, MethodLookup};
pub use context::SiteContext;
pub use throwscan_core::errors::AbstainReason;

use throwscan_core::types::TypeId;

use crate::ast::{CatchClause, Expr};
use crate::types::{Type, TypeSet};

/// Type inference and the subtype relation.
pub trait TypeProvider: Sync {
    /// Types an expression may evaluate to. Empty when unknown.
    fn infer_expression_types(&self, expr: &Expr, ctx: &SiteContext<'_>) -> TypeSet;

    /// Types a catch clause catches. Empty when none of them is known.
    fn infer_catch_clause_type(&self, clause: &CatchClause, ctx: &SiteContext<'_>) -> TypeSet;

    /// The type together with all of its ancestors and implemented interfaces.
    fn expand(&self, ty: Type) -> TypeSet;

    /// Whether a value of `from` may be cast to `to`. Not necessarily symmetric.
    fn can_cast(&self, from: &TypeSet, to: &TypeSet) -> bool;

    /// Parse a configured type string (`A`, `?A`, `A|B`). Empty when invalid.
    fn parse_type_string(&self, source: &str) -> TypeSet;

    /// Constant string value of an expression, if it has one.
    fn string_literal(&self, expr: &Expr, ctx: &SiteContext<'_>) -> Option<String>;

    /// Display name of an interned type.
    fn type_name(&self, id: TypeId) -> &str;
}

/// Call-target resolution and declared exception contracts.
pub trait CallableProvider: Sync {
    /// The callable whose body contains the site.
    fn function_like_in_scope(&self, ctx: &SiteContext<'_>) -> Callable;

    /// Targets of an ordinary call. A callee expression may name several
    /// candidates (e.g. a variable bound to one of two closures).
    fn resolve_call(
        &self,
        callee: &Expr,
        ctx: &SiteContext<'_>,
    ) -> Result<Vec<Callable>, AbstainReason>;

    /// The method `name` looked up on `receiver` (an object expression for
    /// instance lookup, a class reference for static lookup).
    fn resolve_method(
        &self,
        receiver: &Expr,
        name: &str,
        lookup: MethodLookup,
        ctx: &SiteContext<'_>,
    ) -> Result<Callable, AbstainReason>;

    /// The declared exception contract of a callable.
    fn exception_contract(&self, callable: &Callable) -> ExceptionContract;
}
