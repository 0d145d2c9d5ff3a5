//! Immutable scope chains.
//!
//! A [`ScopeChain`] is a borrow-linked stack of scope markers, innermost
//! first. The traversal driver pushes a [`Frame`] on its own call stack when
//! it descends into a function body, a try body, or a catch/finally block,
//! and hands the resulting chain to every site it reaches. Nothing is ever
//! popped: leaving a scope just drops the frame.

use super::nodes::{CatchClause, FunctionLike, TryStmt};

#[derive(Debug, Clone, Copy)]
pub enum ScopeMarker<'a> {
    /// Root of a function-like scope. Chains are never searched past it.
    FunctionRoot(&'a FunctionLike),
    /// Inside the protected body of a try statement.
    TryBody(&'a TryStmt),
    /// Inside one catch block of a try statement.
    CatchBody(&'a TryStmt, &'a CatchClause),
    /// Inside the finally block of a try statement.
    FinallyBody(&'a TryStmt),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeChain<'a> {
    head: Option<&'a Frame<'a>>,
}

#[derive(Debug)]
pub struct Frame<'a> {
    marker: ScopeMarker<'a>,
    parent: ScopeChain<'a>,
}

impl<'a> ScopeChain<'a> {
    /// The empty chain (file level).
    pub const fn root() -> Self {
        Self { head: None }
    }

    /// A frame that extends this chain with `marker`. Borrow it with
    /// [`Frame::chain`] to get the extended chain.
    pub fn push(self, marker: ScopeMarker<'a>) -> Frame<'a> {
        Frame {
            marker,
            parent: self,
        }
    }

    /// Markers from innermost to outermost.
    pub fn iter(self) -> impl Iterator<Item = ScopeMarker<'a>> {
        std::iter::successors(self.head, |frame| frame.parent.head).map(|frame| frame.marker)
    }

    /// Markers up to, but excluding, the innermost function root.
    pub fn within_function(self) -> impl Iterator<Item = ScopeMarker<'a>> {
        self.iter()
            .take_while(|m| !matches!(m, ScopeMarker::FunctionRoot(_)))
    }

    /// The innermost enclosing function-like scope, if any.
    pub fn enclosing_function(self) -> Option<&'a FunctionLike> {
        self.iter().find_map(|m| match m {
            ScopeMarker::FunctionRoot(f) => Some(f),
            _ => None,
        })
    }

    pub fn depth(self) -> usize {
        self.iter().count()
    }
}

impl<'a> Frame<'a> {
    pub fn chain(&'a self) -> ScopeChain<'a> {
        ScopeChain { head: Some(self) }
    }

    pub fn marker(&self) -> ScopeMarker<'a> {
        self.marker
    }
}
