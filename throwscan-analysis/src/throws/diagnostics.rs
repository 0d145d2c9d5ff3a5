//! Contract-violation records and the sink they are written to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four ways a site can violate its function's exception contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A thrown type escapes a function with no declarations.
    ThrowTypeAbsent,
    /// A thrown type escapes and is not covered by the declarations.
    ThrowTypeMismatch,
    /// A type declared by a callee escapes a function with no declarations.
    ThrowTypeAbsentForCall,
    /// A type declared by a callee escapes and is not covered.
    ThrowTypeMismatchForCall,
}

impl DiagnosticKind {
    pub fn absent(for_call: bool) -> Self {
        if for_call {
            Self::ThrowTypeAbsentForCall
        } else {
            Self::ThrowTypeAbsent
        }
    }

    pub fn mismatch(for_call: bool) -> Self {
        if for_call {
            Self::ThrowTypeMismatchForCall
        } else {
            Self::ThrowTypeMismatch
        }
    }

    /// Stable issue name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ThrowTypeAbsent => "ThrowTypeAbsent",
            Self::ThrowTypeMismatch => "ThrowTypeMismatch",
            Self::ThrowTypeAbsentForCall => "ThrowTypeAbsentForCall",
            Self::ThrowTypeMismatchForCall => "ThrowTypeMismatchForCall",
        }
    }

    pub fn is_for_call(&self) -> bool {
        matches!(
            self,
            Self::ThrowTypeAbsentForCall | Self::ThrowTypeMismatchForCall
        )
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::ThrowTypeMismatch | Self::ThrowTypeMismatchForCall)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One contract violation at one site for one offending type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// The analyzed function.
    pub function: String,
    /// The offending type.
    pub thrown_type: String,
    /// The callee, for the `...ForCall` kinds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub invoked: Option<String>,
    /// The declared contract, for the mismatch kinds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub declared: Option<String>,
}

impl Diagnostic {
    /// Human-readable description.
    pub fn message(&self) -> String {
        let invoked = self.invoked.as_deref().unwrap_or_default();
        let declared = self.declared.as_deref().unwrap_or_default();
        match self.kind {
            DiagnosticKind::ThrowTypeAbsent => format!(
                "{}() can throw {} here, but has no '@throws' declarations for that class",
                self.function, self.thrown_type
            ),
            DiagnosticKind::ThrowTypeAbsentForCall => format!(
                "{}() can throw {} because it calls {}(), but has no '@throws' declarations for that class",
                self.function, self.thrown_type, invoked
            ),
            DiagnosticKind::ThrowTypeMismatch => format!(
                "{}() throws {}, but it only has declarations of '@throws {}'",
                self.function, self.thrown_type, declared
            ),
            DiagnosticKind::ThrowTypeMismatchForCall => format!(
                "{}() throws {} because it calls {}(), but it only has declarations of '@throws {}'",
                self.function, self.thrown_type, invoked, declared
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {}",
            self.file,
            self.line,
            self.kind.name(),
            self.message()
        )
    }
}

/// Where diagnostics go. Appends only; the analysis never reads back.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
