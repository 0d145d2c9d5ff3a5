//! Error handling for throwscan.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod abstain;
pub mod config_error;
pub mod error_code;

pub use abstain::AbstainReason;
pub use config_error::ConfigError;
pub use error_code::ThrowscanErrorCode;
