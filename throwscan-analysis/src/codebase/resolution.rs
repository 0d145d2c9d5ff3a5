//! Call-target resolution over the registered model.
//!
//! Failure modes map onto [`AbstainReason`]:
//! - unknown function name: `NotFound`;
//! - callee or receiver without inferable types: `Unresolvable`;
//! - method missing on every receiver type: `DeferredToOtherPass`, since an
//!   undefined method is another check's diagnostic;
//! - several distinct static targets with a strict lookup: `Ambiguous`.

use throwscan_core::errors::AbstainReason;

use super::{Codebase, MethodEntry};
use crate::ast::{Expr, FunctionKind};
use crate::provider::{
    Callable, CallableProvider, ExceptionContract, MethodLookup, SiteContext, TypeProvider,
};
use crate::types::TypeSet;

impl CallableProvider for Codebase {
    fn function_like_in_scope(&self, ctx: &SiteContext<'_>) -> Callable {
        let name = ctx.function.qualified_name();
        if let Some(callable) = self.callable_by_name(&name) {
            return callable;
        }
        // Unregistered scopes still get a stable identity; their contract
        // is undeclared.
        let id = match (&ctx.function.kind, &ctx.function.class) {
            (FunctionKind::Method, Some(class)) => {
                self.interner().intern_method(class, &ctx.function.name)
            }
            _ => self.interner().intern_callable(&name),
        };
        Callable::new(id, name)
    }

    fn resolve_call(
        &self,
        callee: &Expr,
        ctx: &SiteContext<'_>,
    ) -> Result<Vec<Callable>, AbstainReason> {
        match callee {
            Expr::Name(name) | Expr::StringLiteral(name) => self
                .callable_by_name(name)
                .map(|callable| vec![callable])
                .ok_or(AbstainReason::NotFound),
            Expr::Variable(variable) => {
                let ids = self
                    .variable_callables(&ctx.function.qualified_name(), variable)
                    .ok_or(AbstainReason::Unresolvable)?;
                Ok(ids.iter().filter_map(|id| self.callable(*id)).collect())
            }
            Expr::New(_) | Expr::ClassRef(_) | Expr::Unknown => Err(AbstainReason::Unresolvable),
        }
    }

    fn resolve_method(
        &self,
        receiver: &Expr,
        name: &str,
        lookup: MethodLookup,
        ctx: &SiteContext<'_>,
    ) -> Result<Callable, AbstainReason> {
        let classes = match receiver {
            Expr::ClassRef(class) => self.parse(class),
            other => self.infer_expression_types(other, ctx),
        };
        if classes.is_empty() {
            return Err(AbstainReason::Unresolvable);
        }

        let mut found: Vec<MethodEntry> = Vec::new();
        for class in classes.iter() {
            if let Some(method) = self.find_method(class.id(), name) {
                if !found.iter().any(|m| m.id == method.id) {
                    found.push(method);
                }
            }
        }

        let method = match (lookup, found.as_slice()) {
            (_, []) => return Err(AbstainReason::DeferredToOtherPass),
            (MethodLookup::Static { forgiving: false }, [_, _, ..]) => {
                return Err(AbstainReason::Ambiguous)
            }
            (MethodLookup::Static { .. }, [first, ..]) if !first.is_static => {
                // Non-static method called statically: reported elsewhere.
                return Err(AbstainReason::DeferredToOtherPass);
            }
            (_, [first, ..]) => *first,
        };
        self.callable(method.id).ok_or(AbstainReason::NotFound)
    }

    fn exception_contract(&self, callable: &Callable) -> ExceptionContract {
        self.contract(callable.id).cloned().unwrap_or_default()
    }
}

impl Codebase {
    /// Contract of a registered callable by name, for assertions.
    pub fn contract_of(&self, name: &str) -> Option<ExceptionContract> {
        let callable = self.callable_by_name(name)?;
        Some(self.exception_contract(&callable))
    }

    /// Declared types of a callable, empty when undeclared or unknown.
    pub fn declared_types(&self, name: &str) -> TypeSet {
        self.contract_of(name)
            .map(|contract| contract.candidates())
            .unwrap_or_default()
    }
}
