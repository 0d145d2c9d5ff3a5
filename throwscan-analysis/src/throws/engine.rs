//! Tree walk and per-site dispatch.
//!
//! [`ThrowChecker`] walks a lowered file in post-order, building the scope
//! chain as it descends, and hands every site to the handler registered for
//! its [`SiteKind`]. Which handlers are registered depends on configuration:
//! throw sites always, call sites only when invoked callables are checked.

use std::fmt;

use throwscan_core::config::AnalysisConfig;
use throwscan_core::errors::AbstainReason;
use throwscan_core::types::FxHashMap;
use tracing::{debug, info_span, trace};

use crate::ast::{Node, NodeKind, ScopeChain, ScopeMarker, SourceFile};
use crate::provider::{CallableProvider, SiteContext, TypeProvider};
use crate::types::TypeSet;

use super::call_site::{analyze_call, analyze_method_call, analyze_static_call};
use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::ignore_list::IgnoreList;
use super::session::AnalysisSession;
use super::stats::CheckStats;
use super::throw_site::analyze_throw;

/// Node kinds that are analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
    Throw,
    Call,
    MethodCall,
    StaticCall,
}

impl SiteKind {
    pub fn of(kind: &NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Throw(_) => Some(Self::Throw),
            NodeKind::Call { .. } => Some(Self::Call),
            NodeKind::MethodCall { .. } => Some(Self::MethodCall),
            NodeKind::StaticCall { .. } => Some(Self::StaticCall),
            NodeKind::FunctionLike(_) | NodeKind::Block(_) | NodeKind::Try(_) => None,
        }
    }
}

/// One site as seen by a handler.
#[derive(Debug, Clone, Copy)]
pub struct Site<'a> {
    pub kind: SiteKind,
    pub node: &'a Node,
    /// Enclosing scopes, innermost first.
    pub chain: ScopeChain<'a>,
    pub ctx: SiteContext<'a>,
}

/// Collaborators shared by every handler call.
#[derive(Clone, Copy)]
pub struct CheckEnv<'a> {
    pub types: &'a dyn TypeProvider,
    pub callables: &'a dyn CallableProvider,
    ignore: &'a IgnoreList,
}

impl CheckEnv<'_> {
    /// Whether an expanded thrown type escapes the session's ignore list.
    pub fn should_report(&self, expanded: &TypeSet) -> bool {
        self.ignore.should_report(expanded, self.types)
    }
}

/// Diagnostic sink plus the counters of the current run.
pub struct Reporter<'s> {
    sink: &'s mut dyn DiagnosticSink,
    stats: CheckStats,
}

impl<'s> Reporter<'s> {
    pub fn new(sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            sink,
            stats: CheckStats::new(),
        }
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        debug!(
            kind = diagnostic.kind.name(),
            file = %diagnostic.file,
            line = diagnostic.line,
            function = %diagnostic.function,
            thrown = %diagnostic.thrown_type,
            "contract violation"
        );
        self.stats.diagnostics += 1;
        self.sink.emit(diagnostic);
    }

    /// Record that a site was skipped because resolution gave up.
    pub fn abstain(&mut self, reason: AbstainReason, site: &Site<'_>) {
        trace!(
            reason = reason.name(),
            file = site.ctx.file,
            line = site.ctx.span.line,
            "site skipped"
        );
        self.stats.record_abstention(reason);
    }

    /// Record that a throw site had no inferable type.
    pub fn unknown_type(&mut self, site: &Site<'_>) {
        trace!(
            file = site.ctx.file,
            line = site.ctx.span.line,
            "thrown type unknown, site skipped"
        );
        self.stats.unknown_types += 1;
    }

    pub fn stats_mut(&mut self) -> &mut CheckStats {
        &mut self.stats
    }

    pub fn finish(self) -> CheckStats {
        self.stats
    }
}

/// Analyzes one site.
pub type SiteHandler = fn(&CheckEnv<'_>, &Site<'_>, &mut Reporter<'_>);

/// Site handlers keyed by site kind.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: FxHashMap<SiteKind, SiteHandler>,
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl HandlerTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Direct throw sites only.
    pub fn throws_only() -> Self {
        let mut table = Self::empty();
        table.register(SiteKind::Throw, analyze_throw);
        table
    }

    /// Throw sites plus ordinary, method, and static calls.
    pub fn with_invoked_callables() -> Self {
        let mut table = Self::throws_only();
        table.register(SiteKind::Call, analyze_call);
        table.register(SiteKind::MethodCall, analyze_method_call);
        table.register(SiteKind::StaticCall, analyze_static_call);
        table
    }

    pub fn for_config(config: &AnalysisConfig) -> Self {
        if config.effective_check_invoked_callables() {
            Self::with_invoked_callables()
        } else {
            Self::throws_only()
        }
    }

    /// Install `handler` for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: SiteKind, handler: SiteHandler) {
        self.handlers.insert(kind, handler);
    }

    pub fn get(&self, kind: SiteKind) -> Option<SiteHandler> {
        self.handlers.get(&kind).copied()
    }

    pub fn handles(&self, kind: SiteKind) -> bool {
        self.handlers.contains_key(&kind)
    }
}

/// Checks files against one session and the providers it is bound to.
#[derive(Clone, Copy)]
pub struct ThrowChecker<'s> {
    handlers: &'s HandlerTable,
    env: CheckEnv<'s>,
}

impl<'s> ThrowChecker<'s> {
    pub fn new(session: &'s AnalysisSession<'_>) -> Self {
        Self {
            handlers: session.handlers(),
            env: CheckEnv {
                types: session.types(),
                callables: session.callables(),
                ignore: session.ignore_list(),
            },
        }
    }

    /// Analyze every site of `file`, writing diagnostics to `sink`.
    pub fn check_file(&self, file: &SourceFile, sink: &mut dyn DiagnosticSink) -> CheckStats {
        let _span = info_span!("check_file", file = %file.path).entered();
        let mut out = Reporter::new(sink);
        out.stats_mut().files_checked = 1;

        self.walk(&file.path, &file.items, ScopeChain::root(), &mut out);

        let stats = out.finish();
        debug!(
            functions = stats.functions_visited,
            throw_sites = stats.throw_sites,
            call_sites = stats.call_sites,
            diagnostics = stats.diagnostics,
            "file checked"
        );
        stats
    }

    fn walk<'a>(
        &self,
        file: &'a str,
        nodes: &'a [Node],
        chain: ScopeChain<'a>,
        out: &mut Reporter<'_>,
    ) {
        for node in nodes {
            self.visit(file, node, chain, out);
        }
    }

    /// Children first, then the node itself.
    fn visit<'a>(&self, file: &'a str, node: &'a Node, chain: ScopeChain<'a>, out: &mut Reporter<'_>) {
        match &node.kind {
            NodeKind::FunctionLike(function) => {
                out.stats_mut().functions_visited += 1;
                let frame = chain.push(ScopeMarker::FunctionRoot(function));
                self.walk(file, &function.body, frame.chain(), out);
            }
            NodeKind::Block(children) => self.walk(file, children, chain, out),
            NodeKind::Try(stmt) => {
                let body = chain.push(ScopeMarker::TryBody(stmt));
                self.walk(file, &stmt.body, body.chain(), out);
                for clause in &stmt.catches {
                    let frame = chain.push(ScopeMarker::CatchBody(stmt, clause));
                    self.walk(file, &clause.body, frame.chain(), out);
                }
                if let Some(finally) = &stmt.finally {
                    let frame = chain.push(ScopeMarker::FinallyBody(stmt));
                    self.walk(file, finally, frame.chain(), out);
                }
            }
            NodeKind::Throw(_) => self.dispatch(SiteKind::Throw, file, node, chain, out),
            NodeKind::Call { args, .. } => {
                self.walk(file, args, chain, out);
                self.dispatch(SiteKind::Call, file, node, chain, out);
            }
            NodeKind::MethodCall { args, .. } => {
                self.walk(file, args, chain, out);
                self.dispatch(SiteKind::MethodCall, file, node, chain, out);
            }
            NodeKind::StaticCall { args, .. } => {
                self.walk(file, args, chain, out);
                self.dispatch(SiteKind::StaticCall, file, node, chain, out);
            }
        }
    }

    fn dispatch<'a>(
        &self,
        kind: SiteKind,
        file: &'a str,
        node: &'a Node,
        chain: ScopeChain<'a>,
        out: &mut Reporter<'_>,
    ) {
        let Some(handler) = self.handlers.get(kind) else {
            return;
        };
        // File-level code has no contract to check against.
        let Some(function) = chain.enclosing_function() else {
            trace!(file, line = node.span.line, "site outside any function skipped");
            return;
        };
        let site = Site {
            kind,
            node,
            chain,
            ctx: SiteContext::new(file, function, node.span),
        };
        handler(&self.env, &site, out);
    }
}
