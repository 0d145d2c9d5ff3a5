//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the exception-contract analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Also check exceptions declared by invoked functions and methods,
    /// not just direct `throw` sites. Default: false.
    pub check_invoked_callables: Option<bool>,
    /// Exception types whose throw sites never need a declaration,
    /// together with every type they cover.
    #[serde(default)]
    pub ignored_exception_types: Vec<String>,
}

impl AnalysisConfig {
    /// Returns whether call sites are analyzed, defaulting to false.
    pub fn effective_check_invoked_callables(&self) -> bool {
        self.check_invoked_callables.unwrap_or(false)
    }
}
