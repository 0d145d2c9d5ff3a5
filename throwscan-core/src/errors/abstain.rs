//! Reasons a call target could not be resolved.
//!
//! Resolution collaborators return `Result<_, AbstainReason>`. None of these
//! is a failure of the analysis: each one means "skip this site quietly".

use super::error_code::{self, ThrowscanErrorCode};

/// Why a resolver gave up on a call, method call, or static call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, thiserror::Error)]
pub enum AbstainReason {
    /// The callable does not exist in the analyzed codebase.
    #[error("callable not found in codebase")]
    NotFound,

    /// More than one target matched and the lookup was not forgiving.
    #[error("call target is ambiguous")]
    Ambiguous,

    /// The failure is reported by another analysis pass; reporting it here
    /// would duplicate or contradict that diagnostic.
    #[error("condition is reported by another analysis pass")]
    DeferredToOtherPass,

    /// The receiver or callee expression cannot be resolved to a type.
    #[error("expression cannot be resolved")]
    Unresolvable,
}

impl AbstainReason {
    pub const ALL: [AbstainReason; 4] = [
        Self::NotFound,
        Self::Ambiguous,
        Self::DeferredToOtherPass,
        Self::Unresolvable,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Ambiguous => "ambiguous",
            Self::DeferredToOtherPass => "deferred_to_other_pass",
            Self::Unresolvable => "unresolvable",
        }
    }
}

impl ThrowscanErrorCode for AbstainReason {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => error_code::CALLABLE_NOT_FOUND,
            Self::Ambiguous => error_code::AMBIGUOUS_TARGET,
            Self::DeferredToOtherPass => error_code::DEFERRED_TO_OTHER_PASS,
            Self::Unresolvable => error_code::UNRESOLVABLE_EXPRESSION,
        }
    }
}
