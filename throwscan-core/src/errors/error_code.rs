//! ThrowscanErrorCode trait for host-facing error strings.

/// Trait for mapping throwscan errors to stable error codes.
/// Every error enum implements this so hosts can match on a code
/// instead of parsing the message.
pub trait ThrowscanErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CALLABLE_NOT_FOUND: &str = "CALLABLE_NOT_FOUND";
pub const AMBIGUOUS_TARGET: &str = "AMBIGUOUS_TARGET";
pub const DEFERRED_TO_OTHER_PASS: &str = "DEFERRED_TO_OTHER_PASS";
pub const UNRESOLVABLE_EXPRESSION: &str = "UNRESOLVABLE_EXPRESSION";
