//! Type inference over the registered model.

use throwscan_core::types::TypeId;

use super::Codebase;
use crate::ast::{CatchClause, Expr};
use crate::provider::{SiteContext, TypeProvider};
use crate::types::{Type, TypeSet};

impl TypeProvider for Codebase {
    /// `new C` is `C`, bound variables have their bound types, everything
    /// else is unknown.
    fn infer_expression_types(&self, expr: &Expr, ctx: &SiteContext<'_>) -> TypeSet {
        match expr {
            Expr::New(class) => self.parse(class),
            Expr::Variable(name) => self
                .variable_types(&ctx.function.qualified_name(), name)
                .cloned()
                .unwrap_or_default(),
            Expr::StringLiteral(_) | Expr::Name(_) | Expr::ClassRef(_) | Expr::Unknown => {
                TypeSet::empty()
            }
        }
    }

    fn infer_catch_clause_type(&self, clause: &CatchClause, _ctx: &SiteContext<'_>) -> TypeSet {
        let mut caught = TypeSet::empty();
        for name in &clause.types {
            caught.extend(self.parse(name).iter());
        }
        caught
    }

    fn expand(&self, ty: Type) -> TypeSet {
        let mut expanded = TypeSet::of(ty);
        expanded.extend(self.hierarchy().ancestors(ty.id()).into_iter().map(Type::new));
        expanded
    }

    /// True when any member of `from` is a member of `to` (nullability
    /// aside), or `to` contains `mixed`.
    fn can_cast(&self, from: &TypeSet, to: &TypeSet) -> bool {
        if to.iter().any(|t| t.id() == self.mixed()) {
            return true;
        }
        from.iter()
            .any(|f| to.iter().any(|t| t.id() == f.id()))
    }

    fn parse_type_string(&self, source: &str) -> TypeSet {
        let mut parsed = TypeSet::empty();
        for part in source.split('|') {
            let part = part.trim();
            let (nullable, name) = match part.strip_prefix('?') {
                Some(rest) => (true, rest.trim_start()),
                None => (false, part),
            };
            if !is_type_name(name) {
                return TypeSet::empty();
            }
            let id = self.interner().intern(name);
            parsed.insert(if nullable { Type::nullable(id) } else { Type::new(id) });
        }
        parsed
    }

    fn string_literal(&self, expr: &Expr, _ctx: &SiteContext<'_>) -> Option<String> {
        match expr {
            Expr::StringLiteral(value) => Some(value.clone()),
            _ => None,
        }
    }

    fn type_name(&self, id: TypeId) -> &str {
        self.interner().resolve(id)
    }
}

/// `Name`, `\Ns\Name`: identifier segments separated by `\`.
fn is_type_name(name: &str) -> bool {
    let name = name.strip_prefix('\\').unwrap_or(name);
    !name.is_empty()
        && name.split('\\').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
                && chars.all(|c| c == '_' || c.is_alphanumeric())
        })
}
