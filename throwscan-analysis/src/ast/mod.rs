//! Lowered tree representation and scope chains.
//!
//! Hosts translate their own syntax trees into these nodes. Only what the
//! exception-flow analysis looks at survives lowering: function-like scopes,
//! try statements, throws, and the three call shapes. Everything else
//! collapses into [`NodeKind::Block`].

pub mod chain;
pub mod nodes;

pub use chain::{Frame, ScopeChain, ScopeMarker};
pub use nodes::{
    CatchClause, Expr, FunctionKind, FunctionLike, MethodName, Node, NodeKind, SourceFile, Span,
    TryStmt,
};
