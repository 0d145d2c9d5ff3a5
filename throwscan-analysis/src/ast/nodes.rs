//! Node types.

use serde::{Deserialize, Serialize};

/// Source position of a node (1-based line, 0-based column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn line(line: u32) -> Self {
        Self { line, column: 0 }
    }
}

/// One lowered source file.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub path: String,
    pub items: Vec<Node>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, items: Vec<Node>) -> Self {
        Self {
            path: path.into(),
            items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Function, method, or closure body.
    FunctionLike(FunctionLike),
    /// Any other statement or expression grouping.
    Block(Vec<Node>),
    Try(TryStmt),
    /// `throw <expr>`.
    Throw(Expr),
    /// `callee(args)`.
    Call { callee: Expr, args: Vec<Node> },
    /// `receiver->method(args)`.
    MethodCall {
        receiver: Expr,
        method: MethodName,
        args: Vec<Node>,
    },
    /// `Class::method(args)`.
    StaticCall {
        class: Expr,
        method: String,
        args: Vec<Node>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Function,
    Method,
    Closure,
}

#[derive(Debug, Clone)]
pub struct FunctionLike {
    pub name: String,
    pub kind: FunctionKind,
    /// Declaring class for methods.
    pub class: Option<String>,
    pub body: Vec<Node>,
}

impl FunctionLike {
    /// `name` for functions and closures, `Class::name` for methods.
    pub fn qualified_name(&self) -> String {
        match &self.class {
            Some(class) => format!("{}::{}", class.trim_start_matches('\\'), self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TryStmt {
    pub body: Vec<Node>,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Vec<Node>>,
}

/// `catch (A | B $e) { ... }`.
#[derive(Debug, Clone)]
pub struct CatchClause {
    /// Caught type names as written.
    pub types: Vec<String>,
    pub variable: Option<String>,
    pub body: Vec<Node>,
    pub span: Span,
}

/// The method part of a method call.
#[derive(Debug, Clone)]
pub enum MethodName {
    Literal(String),
    /// `$obj->$name()` and friends: the name comes from an expression.
    Dynamic(Expr),
}

/// Expressions the providers are asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `new C(...)`.
    New(String),
    Variable(String),
    StringLiteral(String),
    /// Bare function name in callee position.
    Name(String),
    /// Class name in static-call position (`C::m()`).
    ClassRef(String),
    /// Anything the host could not lower.
    Unknown,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn function(name: &str, line: u32, body: Vec<Node>) -> Self {
        Self::function_like(name, FunctionKind::Function, None, line, body)
    }

    pub fn method(class: &str, name: &str, line: u32, body: Vec<Node>) -> Self {
        Self::function_like(name, FunctionKind::Method, Some(class), line, body)
    }

    pub fn closure(name: &str, line: u32, body: Vec<Node>) -> Self {
        Self::function_like(name, FunctionKind::Closure, None, line, body)
    }

    fn function_like(
        name: &str,
        kind: FunctionKind,
        class: Option<&str>,
        line: u32,
        body: Vec<Node>,
    ) -> Self {
        Self::new(
            NodeKind::FunctionLike(FunctionLike {
                name: name.to_string(),
                kind,
                class: class.map(str::to_string),
                body,
            }),
            Span::line(line),
        )
    }

    pub fn block(line: u32, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Block(children), Span::line(line))
    }

    pub fn throw(expr: Expr, line: u32) -> Self {
        Self::new(NodeKind::Throw(expr), Span::line(line))
    }

    /// `throw new <class>()`.
    pub fn throw_new(class: &str, line: u32) -> Self {
        Self::throw(Expr::New(class.to_string()), line)
    }

    pub fn call(callee: Expr, line: u32, args: Vec<Node>) -> Self {
        Self::new(NodeKind::Call { callee, args }, Span::line(line))
    }

    /// `name()` with no arguments.
    pub fn call_named(name: &str, line: u32) -> Self {
        Self::call(Expr::Name(name.to_string()), line, Vec::new())
    }

    pub fn method_call(receiver: Expr, method: MethodName, line: u32, args: Vec<Node>) -> Self {
        Self::new(
            NodeKind::MethodCall {
                receiver,
                method,
                args,
            },
            Span::line(line),
        )
    }

    pub fn static_call(class: &str, method: &str, line: u32, args: Vec<Node>) -> Self {
        Self::new(
            NodeKind::StaticCall {
                class: Expr::ClassRef(class.to_string()),
                method: method.to_string(),
                args,
            },
            Span::line(line),
        )
    }

    pub fn try_catch(
        line: u32,
        body: Vec<Node>,
        catches: Vec<CatchClause>,
        finally: Option<Vec<Node>>,
    ) -> Self {
        Self::new(
            NodeKind::Try(TryStmt {
                body,
                catches,
                finally,
            }),
            Span::line(line),
        )
    }
}

impl CatchClause {
    /// `catch (<types> $e) { <body> }`.
    pub fn new(types: &[&str], line: u32, body: Vec<Node>) -> Self {
        Self {
            types: types.iter().map(|t| t.to_string()).collect(),
            variable: Some("e".to_string()),
            body,
            span: Span::line(line),
        }
    }
}
