//! Direct `throw` sites.

use crate::ast::NodeKind;
use crate::provider::Callable;
use crate::types::TypeSet;

use super::caught_filter::without_caught;
use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::engine::{CheckEnv, Reporter, Site};

/// Check the types a `throw` expression may raise against the enclosing
/// function's contract.
pub fn analyze_throw(env: &CheckEnv<'_>, site: &Site<'_>, out: &mut Reporter<'_>) {
    let NodeKind::Throw(expr) = &site.node.kind else {
        return;
    };
    out.stats_mut().throw_sites += 1;

    let thrown = env.types.infer_expression_types(expr, &site.ctx);
    if thrown.is_empty() {
        out.unknown_type(site);
        return;
    }
    let escaping = without_caught(&thrown, site.chain, &site.ctx, env.types);
    report_possibly_thrown(env, site, &escaping, None, out);
}

/// Compare each escaping type with the analyzed function's contract and
/// report those it does not cover. `invoked` is the callee for call sites.
pub(crate) fn report_possibly_thrown(
    env: &CheckEnv<'_>,
    site: &Site<'_>,
    escaping: &TypeSet,
    invoked: Option<&Callable>,
    out: &mut Reporter<'_>,
) {
    if escaping.is_empty() {
        return;
    }
    let function = env.callables.function_like_in_scope(&site.ctx);
    let contract = env.callables.exception_contract(&function);
    let for_call = invoked.is_some();

    for ty in escaping.iter() {
        let expanded = env.types.expand(ty);
        if !env.should_report(&expanded) {
            continue;
        }
        let (kind, declared) = match contract.declared() {
            None => (DiagnosticKind::absent(for_call), None),
            Some(declared) if !env.types.can_cast(&expanded, declared) => (
                DiagnosticKind::mismatch(for_call),
                Some(declared.render(env.types)),
            ),
            Some(_) => continue,
        };
        out.emit(Diagnostic {
            kind,
            file: site.ctx.file.to_string(),
            line: site.ctx.span.line,
            column: site.ctx.span.column,
            function: function.name.clone(),
            thrown_type: TypeSet::of(ty).render(env.types),
            invoked: invoked.map(|callee| callee.name.clone()),
            declared,
        });
    }
}
