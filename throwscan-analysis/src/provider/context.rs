//! Per-site context handed to collaborators and analyzers.

use crate::ast::{FunctionLike, Span};

/// Where a site sits: file, innermost enclosing function-like scope, and
/// the site's own position.
#[derive(Debug, Clone, Copy)]
pub struct SiteContext<'a> {
    pub file: &'a str,
    pub function: &'a FunctionLike,
    pub span: Span,
}

impl<'a> SiteContext<'a> {
    pub fn new(file: &'a str, function: &'a FunctionLike, span: Span) -> Self {
        Self {
            file,
            function,
            span,
        }
    }

    /// The same scope at a different position.
    pub fn at(self, span: Span) -> Self {
        Self { span, ..self }
    }
}
