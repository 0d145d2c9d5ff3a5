//! Call, method-call, and static-call sites.
//!
//! The callee's declared contract stands in for the thrown types. Anything
//! that cannot be resolved is skipped without a diagnostic.

use throwscan_core::errors::AbstainReason;

use crate::ast::{MethodName, NodeKind};
use crate::provider::{Callable, MethodLookup};

use super::caught_filter::without_caught;
use super::engine::{CheckEnv, Reporter, Site};
use super::throw_site::report_possibly_thrown;

/// `callee(...)`: every resolved target is checked on its own.
pub fn analyze_call(env: &CheckEnv<'_>, site: &Site<'_>, out: &mut Reporter<'_>) {
    let NodeKind::Call { callee, .. } = &site.node.kind else {
        return;
    };
    out.stats_mut().call_sites += 1;

    match env.callables.resolve_call(callee, &site.ctx) {
        Ok(targets) => {
            for target in &targets {
                check_invoked(env, site, target, out);
            }
        }
        Err(reason) => out.abstain(reason, site),
    }
}

/// `$receiver->method(...)`, with a literal or constant-string method name.
pub fn analyze_method_call(env: &CheckEnv<'_>, site: &Site<'_>, out: &mut Reporter<'_>) {
    let NodeKind::MethodCall {
        receiver, method, ..
    } = &site.node.kind
    else {
        return;
    };
    out.stats_mut().call_sites += 1;

    let name = match method {
        MethodName::Literal(name) => name.clone(),
        MethodName::Dynamic(expr) => match env.types.string_literal(expr, &site.ctx) {
            Some(name) => name,
            None => return out.abstain(AbstainReason::Unresolvable, site),
        },
    };
    match env
        .callables
        .resolve_method(receiver, &name, MethodLookup::Instance, &site.ctx)
    {
        Ok(target) => check_invoked(env, site, &target, out),
        Err(reason) => out.abstain(reason, site),
    }
}

/// `Class::method(...)`, resolved forgivingly.
pub fn analyze_static_call(env: &CheckEnv<'_>, site: &Site<'_>, out: &mut Reporter<'_>) {
    let NodeKind::StaticCall { class, method, .. } = &site.node.kind else {
        return;
    };
    out.stats_mut().call_sites += 1;

    let lookup = MethodLookup::Static { forgiving: true };
    match env.callables.resolve_method(class, method, lookup, &site.ctx) {
        Ok(target) => check_invoked(env, site, &target, out),
        Err(reason) => out.abstain(reason, site),
    }
}

fn check_invoked(env: &CheckEnv<'_>, site: &Site<'_>, callee: &Callable, out: &mut Reporter<'_>) {
    let candidates = env.callables.exception_contract(callee).candidates();
    if candidates.is_empty() {
        return;
    }
    let escaping = without_caught(&candidates, site.chain, &site.ctx, env.types);
    report_possibly_thrown(env, site, &escaping, Some(callee), out);
}
